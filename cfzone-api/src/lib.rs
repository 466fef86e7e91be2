//! # cfzone-api
//!
//! Typed async client for the Cloudflare v4 API, covering the zone and DNS
//! record surface used by the `cfzone` CLI.
//!
//! ## Features
//!
//! - **Zone resolution**: look zones up by name or by 32-hex ID with one
//!   call, including the fallback path for ID-shaped names
//! - **Record CRUD**: list (with server-side type/name filters), get,
//!   create, update, and delete DNS records
//! - **Typed failures**: Cloudflare error codes mapped onto [`ApiError`]
//!   variants with actionable messages, including permission guidance for
//!   zone-scoped tokens
//! - **Transparent pagination**: list calls walk every page and return the
//!   complete set
//!
//! ## Authentication
//!
//! Both Cloudflare auth schemes are supported through [`Credentials`]:
//! scoped API tokens (recommended) and the legacy global key + email pair.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cfzone_api::{Client, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cfzone_api::ApiError> {
//!     let client = Client::new(Credentials::Token("your-api-token".into()))?;
//!
//!     let zone = client.get_zone("example.com").await?;
//!     println!("{} ({})", zone.name, zone.id);
//!
//!     for record in client.list_records(&zone.id, None, None).await? {
//!         println!("{} {} -> {}", record.record_type, record.name, record.content);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`]. Useful groupings:
//!
//! - [`ApiError::is_permission`] spots token-scope problems regardless of
//!   which operation hit them
//! - [`ApiError::is_expected`] separates lookups that found nothing from
//!   genuine failures
//!
//! Nothing is retried internally; [`ApiError::RateLimited`] carries the
//! server's `Retry-After` hint for callers that want to back off.

mod client;
mod error;
mod http;
mod records;
mod types;
mod zones;

pub use client::{Client, API_BASE};
pub use error::{ApiError, Result};
pub use types::{
    CreateRecordParams, Credentials, DnsRecord, RecordType, UpdateRecordParams, Zone, ZoneStatus,
};
pub use zones::looks_like_zone_id;
