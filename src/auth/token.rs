use serde::{Deserialize, Serialize};

/// The access/refresh credential pair persisted by a token store.
///
/// A stored record always carries both fields non-empty; a half-filled pair
/// is never persisted. Wire names match the auth endpoints (`accessToken`,
/// `refreshToken`).
///
/// # Example
/// ```
/// use jobline_client::auth::AuthTokens;
///
/// let tokens = AuthTokens::new("access", "refresh");
/// assert_eq!(tokens.access_token, "access");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Both halves present and non-empty.
    pub(crate) fn is_complete(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}
