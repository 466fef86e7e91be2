use reqwest::StatusCode;
use thiserror::Error;

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type for all Cloudflare API operations.
///
/// Transport failures, envelope decode failures, and Cloudflare error codes
/// all map into this enum. No variant is retried automatically; callers see
/// every failure exactly once.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, TLS setup, etc.).
    #[error("network error: {detail}")]
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("request timed out: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The response body could not be decoded as a v4 envelope.
    #[error("failed to parse API response: {detail}")]
    Parse {
        /// Details about the decode failure.
        detail: String,
    },

    /// The credentials were rejected by the API.
    #[error("authentication failed: {message}")]
    InvalidCredentials {
        /// Original error message from the API.
        message: String,
    },

    /// The credentials are valid but lack access to the resource.
    #[error("permission denied: {message}")]
    PermissionDenied {
        /// Original error message from the API.
        message: String,
    },

    /// The API rate limit was hit (HTTP 429). The request is not retried.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Suggested wait in seconds, from the `Retry-After` header.
        retry_after: Option<u64>,
        /// Original error message from the API.
        message: String,
    },

    /// No zone matched the given name or identifier.
    #[error("zone not found: {zone}")]
    ZoneNotFound {
        /// The name or identifier that was looked up.
        zone: String,
    },

    /// A zone lookup by name was rejected for permission reasons.
    ///
    /// Tokens scoped to specific zones cannot list the account's zones, so a
    /// name lookup is impossible with them. The message spells out the two
    /// ways around that.
    #[error(
        "permission denied when looking up zone by name.\n\n\
         This usually happens when your API token is scoped to specific zones.\n\
         To fix this, either:\n\
         \x20 1. Use the zone ID directly: cfzone zones get <zone-id>\n\
         \x20 2. Grant your token \"All zones\" read permission\n\n\
         Error: {message}"
    )]
    ZoneLookupDenied {
        /// The underlying permission error.
        message: String,
    },

    /// Listing the account's zones was rejected for permission reasons.
    #[error(
        "permission denied: your API token may not have 'Zone:Read' permission for all zones ({message})"
    )]
    ZoneListDenied {
        /// The underlying permission error.
        message: String,
    },

    /// The specified DNS record was not found.
    #[error("DNS record not found: {record_id}")]
    RecordNotFound {
        /// ID of the record that was not found.
        record_id: String,
    },

    /// A DNS record with the same name/type already exists.
    #[error("DNS record '{name}' already exists: {message}")]
    RecordExists {
        /// Name of the conflicting record.
        name: String,
        /// Original error message from the API.
        message: String,
    },

    /// A request parameter was rejected (bad TTL, malformed address, etc.).
    #[error("invalid {param}: {detail}")]
    InvalidParameter {
        /// Name of the offending parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Any other API failure, carrying the first error code when present.
    #[error("API error: {message}")]
    Api {
        /// Raw Cloudflare error code, if the envelope carried one.
        code: Option<u32>,
        /// Raw error message.
        message: String,
    },
}

impl ApiError {
    /// Whether this is a permission/authorization failure per the
    /// classification rule: HTTP 403 at mapping time, or an error message
    /// containing a permission marker (case-insensitive).
    #[must_use]
    pub fn is_permission(&self) -> bool {
        match self {
            Self::PermissionDenied { .. }
            | Self::ZoneLookupDenied { .. }
            | Self::ZoneListDenied { .. } => true,
            other => has_permission_marker(&other.to_string()),
        }
    }

    /// Whether this error is an expected outcome of user input (missing
    /// resources, bad parameters, insufficient credentials) rather than an
    /// infrastructure failure. Used to pick the log level.
    ///
    /// **Update this when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::ZoneLookupDenied { .. }
                | Self::ZoneListDenied { .. }
                | Self::RecordNotFound { .. }
                | Self::RecordExists { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Fill in the record ID on placeholder-context variants.
    pub(crate) fn with_record_context(self, record_id: &str) -> Self {
        match self {
            Self::RecordNotFound { .. } => Self::RecordNotFound {
                record_id: record_id.to_string(),
            },
            other => other,
        }
    }

    /// Fill in the record name on placeholder-context variants.
    pub(crate) fn with_record_name(self, name: &str) -> Self {
        match self {
            Self::RecordExists { message, .. } => Self::RecordExists {
                name: name.to_string(),
                message,
            },
            other => other,
        }
    }

    /// Fill in the zone on placeholder-context variants.
    pub(crate) fn with_zone_context(self, zone: &str) -> Self {
        match self {
            Self::ZoneNotFound { .. } => Self::ZoneNotFound {
                zone: zone.to_string(),
            },
            other => other,
        }
    }
}

/// Case-insensitive scan for the markers Cloudflare's authorization
/// failures carry in their messages.
pub(crate) fn has_permission_marker(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("permission")
        || lower.contains("unauthorized")
        || lower.contains("forbidden")
        || lower.contains("403")
}

/// Map a Cloudflare error code (or, failing that, the HTTP status and
/// message) to an [`ApiError`].
///
/// Reference: <https://api.cloudflare.com/#getting-started-responses>
pub(crate) fn map_api_error(code: Option<u32>, message: String, status: StatusCode) -> ApiError {
    match code {
        // Authentication errors
        // 6003: Invalid request headers
        // 6103: Invalid format for X-Auth-Key header
        // 6111: Invalid format for Authorization header
        // 10000: Authentication error
        Some(6003 | 6103 | 6111 | 10000) => ApiError::InvalidCredentials { message },

        // 9109: Unauthorized to access requested resource
        Some(9109) => ApiError::PermissionDenied { message },

        // Invalid parameter
        // 1004: DNS Validation Error
        // 9000: Invalid or missing name
        // 9005: Content for A record is invalid. Must be a valid IPv4 address
        // 9006: Content for AAAA record is invalid. Must be a valid IPv6 address
        // 9009: Content for MX record must be a hostname
        // 9021: Invalid TTL. Must be between 120 and 2147483647 seconds or 1 for automatic
        // 9041: This DNS record cannot be proxied
        Some(code @ (1004 | 9000 | 9005 | 9006 | 9009 | 9021 | 9041)) => {
            let param = match code {
                9000 => "name",
                9005 | 9006 | 9009 => "content",
                9021 => "ttl",
                9041 => "proxied",
                // 1004 is a general validation error.
                _ => "general",
            };
            ApiError::InvalidParameter {
                param: param.to_string(),
                detail: message,
            }
        }

        // Record already exists
        // 81053: An A, AAAA or CNAME record already exists with that host
        // 81054: A CNAME record with that host already exists
        // 81055: An A record with that host already exists
        // 81056: NS records with that host already exist
        // 81057: The record already exists
        // 81058: A record with those settings already exists
        Some(81053..=81058) => ApiError::RecordExists {
            name: "<unknown>".to_string(),
            message,
        },

        // 81044: Record does not exist
        Some(81044) => ApiError::RecordNotFound {
            record_id: "<unknown>".to_string(),
        },

        // Zone does not exist / bad zone identifier in the path
        // 7000: No route for that URI
        // 7003: Could not route to the path; the object identifier is invalid
        Some(7000 | 7003) => ApiError::ZoneNotFound {
            zone: "<unknown>".to_string(),
        },

        // Unmapped code or no envelope: classify by status and message.
        _ => {
            if status == StatusCode::UNAUTHORIZED {
                ApiError::InvalidCredentials { message }
            } else if status == StatusCode::FORBIDDEN || has_permission_marker(&message) {
                ApiError::PermissionDenied { message }
            } else {
                ApiError::Api { code, message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: Option<u32>, message: &str) -> ApiError {
        map_api_error(code, message.to_string(), StatusCode::BAD_REQUEST)
    }

    // ---- Auth errors ----

    #[test]
    fn auth_error_6003() {
        let err = map(Some(6003), "bad header");
        assert!(matches!(err, ApiError::InvalidCredentials { .. }));
    }

    #[test]
    fn auth_error_10000() {
        let err = map(Some(10000), "authentication error");
        assert!(matches!(err, ApiError::InvalidCredentials { .. }));
    }

    #[test]
    fn permission_error_9109() {
        let err = map(Some(9109), "unauthorized to access requested resource");
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
        assert!(err.is_permission());
    }

    // ---- Invalid parameter errors ----

    #[test]
    fn invalid_param_1004_general() {
        let err = map(Some(1004), "DNS validation error");
        assert!(matches!(
            err,
            ApiError::InvalidParameter { param, .. } if param == "general"
        ));
    }

    #[test]
    fn invalid_param_9000_name() {
        let err = map(Some(9000), "invalid name");
        assert!(matches!(
            err,
            ApiError::InvalidParameter { param, .. } if param == "name"
        ));
    }

    #[test]
    fn invalid_param_9005_content() {
        let err = map(Some(9005), "must be a valid IPv4 address");
        assert!(matches!(
            err,
            ApiError::InvalidParameter { param, .. } if param == "content"
        ));
    }

    #[test]
    fn invalid_param_9021_ttl() {
        let err = map(Some(9021), "invalid TTL");
        assert!(matches!(
            err,
            ApiError::InvalidParameter { param, .. } if param == "ttl"
        ));
    }

    #[test]
    fn invalid_param_9041_proxied() {
        let err = map(Some(9041), "cannot be proxied");
        assert!(matches!(
            err,
            ApiError::InvalidParameter { param, .. } if param == "proxied"
        ));
    }

    // ---- Record exists / not found ----

    #[test]
    fn record_exists_81057() {
        let err = map(Some(81057), "record already exists");
        assert!(matches!(err, ApiError::RecordExists { .. }));
    }

    #[test]
    fn record_exists_context_fixup() {
        let err = map(Some(81053), "already exists").with_record_name("www");
        assert!(matches!(
            err,
            ApiError::RecordExists { name, .. } if name == "www"
        ));
    }

    #[test]
    fn record_not_found_81044() {
        let err = map(Some(81044), "record does not exist").with_record_context("rec-123");
        assert!(matches!(
            err,
            ApiError::RecordNotFound { record_id } if record_id == "rec-123"
        ));
    }

    // ---- Zone not found ----

    #[test]
    fn zone_not_found_7003() {
        let err = map(Some(7003), "could not route").with_zone_context("example.com");
        assert!(matches!(
            err,
            ApiError::ZoneNotFound { zone } if zone == "example.com"
        ));
    }

    #[test]
    fn zone_not_found_display() {
        let err = ApiError::ZoneNotFound {
            zone: "example.com".to_string(),
        };
        assert_eq!(err.to_string(), "zone not found: example.com");
    }

    // ---- Status/message fallbacks ----

    #[test]
    fn status_403_maps_to_permission() {
        let err = map_api_error(None, "nope".to_string(), StatusCode::FORBIDDEN);
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
    }

    #[test]
    fn status_401_maps_to_credentials() {
        let err = map_api_error(None, "nope".to_string(), StatusCode::UNAUTHORIZED);
        assert!(matches!(err, ApiError::InvalidCredentials { .. }));
    }

    #[test]
    fn message_marker_maps_to_permission() {
        let err = map(Some(12345), "You are Unauthorized to do that");
        assert!(matches!(err, ApiError::Api { .. }) || err.is_permission());
        // Unknown code falls through, then the marker scan catches it.
        let err = map(None, "request Forbidden by firewall");
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
    }

    #[test]
    fn fallback_unknown_code() {
        let err = map(Some(99999), "something unexpected");
        assert!(matches!(
            err,
            ApiError::Api { code: Some(99999), message } if message == "something unexpected"
        ));
    }

    #[test]
    fn fallback_no_code() {
        let err = map(None, "no envelope at all");
        assert!(matches!(
            err,
            ApiError::Api { code: None, message } if message == "no envelope at all"
        ));
    }

    // ---- Permission classification ----

    #[test]
    fn lookup_denied_is_permission_and_carries_guidance() {
        let err = ApiError::ZoneLookupDenied {
            message: "permission denied".to_string(),
        };
        assert!(err.is_permission());
        let text = err.to_string();
        assert!(text.contains("scoped to specific zones"));
        assert!(text.contains("Use the zone ID directly"));
        assert!(text.contains("\"All zones\" read permission"));
    }

    #[test]
    fn list_denied_is_permission() {
        let err = ApiError::ZoneListDenied {
            message: "forbidden".to_string(),
        };
        assert!(err.is_permission());
        assert!(err.to_string().contains("'Zone:Read' permission"));
    }

    #[test]
    fn zone_not_found_is_not_permission() {
        let err = ApiError::ZoneNotFound {
            zone: "example.com".to_string(),
        };
        assert!(!err.is_permission());
    }

    // ---- Expectedness for log levels ----

    #[test]
    fn expected_variants() {
        assert!(ApiError::RecordNotFound {
            record_id: "x".to_string()
        }
        .is_expected());
        assert!(ApiError::InvalidCredentials {
            message: "x".to_string()
        }
        .is_expected());
        assert!(!ApiError::Network {
            detail: "x".to_string()
        }
        .is_expected());
        assert!(!ApiError::Parse {
            detail: "x".to_string()
        }
        .is_expected());
    }
}
