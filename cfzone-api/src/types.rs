//! Cloudflare v4 API types: the response envelope and the domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Cloudflare's uniform v4 response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<ApiErrorEnvelope>>,
    pub result_info: Option<ResultInfo>,
}

/// One entry of the envelope's `errors` array.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub code: u32,
    pub message: String,
}

/// Pagination block on list responses.
#[derive(Debug, Deserialize)]
pub struct ResultInfo {
    #[allow(dead_code)]
    pub page: u32,
    #[allow(dead_code)]
    pub per_page: u32,
    pub total_count: u32,
}

/// Authentication material for the API.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Scoped API token, sent as `Authorization: Bearer`.
    Token(String),
    /// Legacy global key plus account email, sent as `X-Auth-Key` /
    /// `X-Auth-Email`.
    KeyEmail { key: String, email: String },
}

impl Credentials {
    /// Human-readable name of the auth method, for status messages.
    #[must_use]
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Token(_) => "API Token",
            Self::KeyEmail { .. } => "API Key + Email",
        }
    }
}

/// A DNS zone under the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub status: ZoneStatus,
}

/// Zone lifecycle state. Statuses Cloudflare adds later land on `Unknown`
/// instead of failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Active,
    Pending,
    Initializing,
    Moved,
    Deleted,
    Deactivated,
    #[serde(other)]
    Unknown,
}

impl ZoneStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Initializing => "initializing",
            Self::Moved => "moved",
            Self::Deleted => "deleted",
            Self::Deactivated => "deactivated",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported DNS record types. Validated at the flag-parsing boundary, so
/// nothing past it ever sees an unknown type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
    Ns,
    Srv,
    Caa,
}

impl RecordType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "TXT" => Ok(Self::Txt),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "SRV" => Ok(Self::Srv),
            "CAA" => Ok(Self::Caa),
            other => Err(ApiError::InvalidParameter {
                param: "type".to_string(),
                detail: format!(
                    "unsupported record type '{other}' (expected one of A, AAAA, CNAME, TXT, MX, NS, SRV, CAA)"
                ),
            }),
        }
    }
}

/// A DNS record within a zone.
///
/// A record ID is meaningless without its owning zone ID; every operation
/// takes both. TTL 1 is the provider's "automatic" sentinel. `proxied` is
/// absent in payloads for non-proxyable types and flattens to `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Request body for `POST /zones/{id}/dns_records`.
///
/// `priority` and `comment` are omitted from the body entirely when `None`;
/// zero is a legal priority, not an "unset" sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRecordParams {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request body for `PATCH /zones/{id}/dns_records/{record_id}`.
///
/// Omitted optionals keep their provider-side values; an explicit empty
/// `comment` clears the stored one.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRecordParams {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parses_case_insensitively() {
        assert_eq!("a".parse::<RecordType>().unwrap(), RecordType::A);
        assert_eq!("cname".parse::<RecordType>().unwrap(), RecordType::Cname);
        assert_eq!("MX".parse::<RecordType>().unwrap(), RecordType::Mx);
    }

    #[test]
    fn record_type_rejects_unknown_types() {
        let err = "PTR".parse::<RecordType>().unwrap_err();
        assert!(err.to_string().contains("unsupported record type 'PTR'"));
    }

    #[test]
    fn record_type_displays_wire_format() {
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
        assert_eq!(RecordType::Caa.to_string(), "CAA");
    }

    #[test]
    fn create_params_omit_unset_optionals() {
        let params = CreateRecordParams {
            record_type: RecordType::A,
            name: "www.example.com".to_string(),
            content: "203.0.113.10".to_string(),
            ttl: 1,
            proxied: false,
            priority: None,
            comment: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "A",
                "name": "www.example.com",
                "content": "203.0.113.10",
                "ttl": 1,
                "proxied": false
            })
        );
    }

    #[test]
    fn update_params_keep_explicit_empty_comment() {
        let params = UpdateRecordParams {
            record_type: RecordType::Txt,
            name: "example.com".to_string(),
            content: "v=spf1 -all".to_string(),
            ttl: 300,
            proxied: false,
            priority: None,
            comment: Some(String::new()),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["comment"], serde_json::json!(""));
    }

    #[test]
    fn record_without_proxied_field_flattens_to_false() {
        let record: DnsRecord = serde_json::from_str(
            r#"{"id":"abc","type":"MX","name":"example.com","content":"mail.example.com","ttl":3600,"priority":10}"#,
        )
        .unwrap();
        assert!(!record.proxied);
        assert_eq!(record.priority, Some(10));
        assert!(record.created_on.is_none());
    }

    #[test]
    fn record_timestamps_parse() {
        let record: DnsRecord = serde_json::from_str(
            r#"{"id":"abc","type":"A","name":"www.example.com","content":"203.0.113.10","ttl":1,"proxied":true,"created_on":"2024-01-15T09:30:00.000000Z","modified_on":"2024-01-15T09:30:00.000000Z"}"#,
        )
        .unwrap();
        assert!(record.created_on.is_some());
        assert!(record.proxied);
    }

    #[test]
    fn zone_status_unexpected_value_lands_on_unknown() {
        let zone: Zone =
            serde_json::from_str(r#"{"id":"x","name":"example.com","status":"read only"}"#)
                .unwrap();
        assert_eq!(zone.status, ZoneStatus::Unknown);
        assert_eq!(zone.status.to_string(), "unknown");
    }

    #[test]
    fn zone_status_known_values_round_trip() {
        let zone: Zone =
            serde_json::from_str(r#"{"id":"x","name":"example.com","status":"pending"}"#).unwrap();
        assert_eq!(zone.status, ZoneStatus::Pending);
        assert_eq!(
            serde_json::to_value(zone.status).unwrap(),
            serde_json::json!("pending")
        );
    }
}
