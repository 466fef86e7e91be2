//! CLI-level errors. API failures pass through transparently so their
//! messages (including the multi-line permission guidance) reach the user
//! unchanged.

use cfzone_api::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Config file handling failed (unserializable content, no home
    /// directory, unwritable path).
    #[error("config error: {0}")]
    Config(String),

    /// No usable credentials in the environment or the config file.
    #[error(
        "no credentials configured\n\n\
         Set one of the following:\n\
         \x20 Environment variable: CLOUDFLARE_API_TOKEN\n\
         \x20 or\n\
         \x20 Environment variables: CLOUDFLARE_API_KEY + CLOUDFLARE_API_EMAIL\n\
         \x20 or\n\
         \x20 Config file at ~/.cloudflare/config.yaml with:\n\
         \x20   api_token: your-token-here"
    )]
    Credentials,

    /// A flag combination or value was rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The foreground update check could not reach the release feed.
    #[error("update check failed: {0}")]
    Update(String),
}

impl CliError {
    /// Whether this failure is an expected outcome of user input (bad
    /// flags, missing credentials, absent resources) rather than an
    /// infrastructure problem. Picks the log level on the failure path.
    ///
    /// **Update this when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Config(_) | Self::Credentials | Self::Validation(_) => true,
            Self::Api(e) => e.is_expected(),
            Self::Io(_) | Self::Json(_) | Self::Update(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_lists_every_option() {
        let text = CliError::Credentials.to_string();
        assert!(text.contains("CLOUDFLARE_API_TOKEN"));
        assert!(text.contains("CLOUDFLARE_API_KEY + CLOUDFLARE_API_EMAIL"));
        assert!(text.contains("~/.cloudflare/config.yaml"));
    }

    #[test]
    fn api_errors_pass_through_unwrapped() {
        let err = CliError::from(ApiError::ZoneNotFound {
            zone: "example.com".to_string(),
        });
        assert_eq!(err.to_string(), "zone not found: example.com");
    }

    #[test]
    fn user_input_failures_are_expected() {
        assert!(CliError::Credentials.is_expected());
        assert!(CliError::Validation("bad flag".to_string()).is_expected());
        assert!(CliError::Config("no home directory".to_string()).is_expected());
    }

    #[test]
    fn expectedness_delegates_to_the_api_error() {
        let missing = CliError::from(ApiError::RecordNotFound {
            record_id: "rec-1".to_string(),
        });
        assert!(missing.is_expected());

        let offline = CliError::from(ApiError::Network {
            detail: "connection refused".to_string(),
        });
        assert!(!offline.is_expected());
    }

    #[test]
    fn infrastructure_failures_are_not_expected() {
        assert!(!CliError::Update("feed unreachable".to_string()).is_expected());
        assert!(!CliError::Json(serde_json::from_str::<()>("{").unwrap_err()).is_expected());
    }
}
