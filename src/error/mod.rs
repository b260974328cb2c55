//! Error types for the Jobline client.

use thiserror::Error;

use crate::auth::AuthError;

/// Normalized error surfaced to callers of [`crate::client::ApiClient`].
///
/// Every failure — connectivity, non-2xx response, refresh failure — is
/// mapped into this shape; callers never see raw transport errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Response obtained with a non-2xx status.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Server-provided field errors, passed through opaque.
        errors: Option<serde_json::Value>,
    },

    /// No response obtained (connectivity, DNS, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// The refresh path failed; stored credentials were cleared.
    #[error("Authentication error: {0}")]
    Auth(AuthError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Create an API error with no field errors.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// HTTP status associated with this error, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Auth(err) => err.status(),
            _ => None,
        }
    }

    /// A 401 response on an already-retried (or unrecoverable) request.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::api(status.as_u16(), error.to_string()),
            None => Self::Network(error.to_string()),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_helper_sets_status_and_message() {
        let err = ClientError::api(404, "Not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API error (status 404): Not found");
    }

    #[test]
    fn auth_error_status_passes_through() {
        let err = ClientError::Auth(AuthError::RefreshRejected {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn network_error_has_no_status() {
        let err = ClientError::Network("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_auth_expired());
    }

    #[test]
    fn auth_expired_matches_401_only() {
        assert!(ClientError::api(401, "Unauthorized").is_auth_expired());
        assert!(!ClientError::api(403, "Forbidden").is_auth_expired());
    }
}
