//! Client construction and credential verification.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::types::{Credentials, Zone};

/// Production Cloudflare v4 endpoint.
pub const API_BASE: &str = "https://api.cloudflare.com/client/v4";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the Cloudflare v4 API.
///
/// Holds one credential set and a pooled HTTP client. Operations never
/// retry; rate limits and transport failures surface as [`ApiError`]
/// values for the caller to act on.
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: Credentials,
    pub(crate) base_url: String,
}

impl Client {
    /// Build a client against the production endpoint.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying TLS backend cannot be initialized.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, API_BASE)
    }

    /// Build a client against a custom endpoint. Tests point this at a
    /// local mock server.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying TLS backend cannot be initialized.
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network {
                detail: e.to_string(),
            })?;

        Ok(Self {
            http,
            credentials,
            base_url: base_url.into(),
        })
    }

    /// Check that the configured credentials can reach the API.
    ///
    /// Bearer tokens go through the token-verification endpoint first.
    /// Key+email pairs have no such endpoint, and narrowly scoped tokens
    /// may be denied access to it even when valid, so both fall back to
    /// fetching a single zones page as a functional probe.
    ///
    /// # Errors
    ///
    /// Returns the probe's error when neither check succeeds, typically
    /// [`ApiError::InvalidCredentials`].
    pub async fn verify_token(&self) -> Result<()> {
        #[derive(Deserialize)]
        struct VerifyResult {
            status: String,
        }

        if let Credentials::Token(_) = self.credentials {
            match self.get::<VerifyResult>("/user/tokens/verify").await {
                Ok(result) if result.status == "active" => return Ok(()),
                Ok(result) => {
                    log::debug!("token status is '{}', probing zone access", result.status);
                }
                Err(e) => log::debug!("token verification failed ({e}), probing zone access"),
            }
        }

        self.get_with_info::<Zone>("/zones?page=1&per_page=1").await?;
        Ok(())
    }
}
