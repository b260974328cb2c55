//! Client configuration (layered: code > env > `.env` file).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientError;

const ENV_API_URL: &str = "JOBLINE_API_URL";
const ENV_TIMEOUT_SECS: &str = "JOBLINE_TIMEOUT_SECS";
const ENV_TOKEN_DIR: &str = "JOBLINE_TOKEN_DIR";

/// Transport timeout used when neither code nor env provides one. Shared
/// with the client builder so the two defaults cannot drift.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings fed into [`crate::client::ApiClientBuilder`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Directory for the file-backed token store; `None` uses the default
    /// home-directory location.
    pub token_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            token_dir: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token_dir(mut self, dir: PathBuf) -> Self {
        self.token_dir = Some(dir);
        self
    }

    /// Resolve from environment variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ClientError> {
        let _ = dotenvy::dotenv(); // ignore a missing .env
        let base_url = std::env::var(ENV_API_URL).map_err(|_| {
            ClientError::Configuration(format!("{ENV_API_URL} is not set"))
        })?;
        let timeout = match std::env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ClientError::Configuration(format!(
                        "{ENV_TIMEOUT_SECS} must be an integer, got {raw:?}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_TIMEOUT,
        };
        let token_dir = std::env::var(ENV_TOKEN_DIR).ok().map(PathBuf::from);
        Ok(Self {
            base_url,
            timeout,
            token_dir,
        })
    }
}
