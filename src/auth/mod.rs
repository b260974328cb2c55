//! Credential storage and the refresh exchange.

pub mod error;
pub mod refresh;
pub mod store;
pub mod token;

pub use error::AuthError;
pub use refresh::SessionExpiredHook;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreConfig};
pub use token::AuthTokens;
