//! Common imports for consumers of the client.

pub use crate::auth::{AuthTokens, FileTokenStore, MemoryTokenStore, TokenStore};
pub use crate::client::{ApiClient, ApiClientBuilder, ApiResponse};
pub use crate::config::ClientConfig;
pub use crate::error::{ClientError, Result};
