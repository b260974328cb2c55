use thiserror::Error;

use crate::error::ClientError;

/// Errors produced by token storage and the refresh exchange.
///
/// `Clone` lets a terminal refresh failure be handed to every caller that
/// was waiting on the same exchange.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No stored credentials")]
    NoStoredCredentials,
    #[error("No refresh token")]
    NoRefreshToken,
    #[error("Refresh rejected with status {status}: {message}")]
    RefreshRejected { status: u16, message: String },
    #[error("Incomplete token pair")]
    IncompleteTokens,
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Status of the failed refresh exchange, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RefreshRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<AuthError> for ClientError {
    fn from(error: AuthError) -> Self {
        ClientError::Auth(error)
    }
}
