use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::token::AuthTokens;

const TOKEN_FILE_NAME: &str = "tokens.json";

/// Storage abstraction for the persisted token pair.
///
/// The pair is read, written, and cleared as a whole record; no partial
/// updates are exposed.
pub trait TokenStore: Send + Sync {
    /// Returns `Ok(None)` when no record exists or the persisted record is
    /// malformed; malformed data is treated as absent, never as an error.
    fn load(&self) -> Result<Option<AuthTokens>, AuthError>;
    fn save(&self, tokens: &AuthTokens) -> Result<(), AuthError>;
    /// Idempotent; clearing an empty store succeeds.
    fn clear(&self) -> Result<(), AuthError>;
}

/// Configuration for file-backed token storage.
#[derive(Debug, Clone)]
pub struct TokenStoreConfig {
    pub base_dir: PathBuf,
}

impl TokenStoreConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_dir() -> PathBuf {
        default_jobline_dir()
    }
}

/// File-backed token store keeping a single JSON record.
///
/// # Example
/// ```no_run
/// use jobline_client::auth::{AuthTokens, FileTokenStore, TokenStore};
///
/// let store = FileTokenStore::new_default();
/// store.save(&AuthTokens::new("access", "refresh"))?;
/// # Ok::<(), jobline_client::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    base_dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(config: TokenStoreConfig) -> Self {
        Self {
            base_dir: config.base_dir,
        }
    }

    pub fn new_default() -> Self {
        Self {
            base_dir: default_jobline_dir(),
        }
    }

    fn token_path(&self) -> PathBuf {
        self.base_dir.join(TOKEN_FILE_NAME)
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AuthTokens>, AuthError> {
        let path = self.token_path();
        let raw = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        // Malformed records read as absent.
        let file: TokenFile = match serde_json::from_str(&raw) {
            Ok(file) => file,
            Err(_) => return Ok(None),
        };
        if !file.tokens.is_complete() {
            return Ok(None);
        }
        Ok(Some(file.tokens))
    }

    fn save(&self, tokens: &AuthTokens) -> Result<(), AuthError> {
        if !tokens.is_complete() {
            return Err(AuthError::IncompleteTokens);
        }
        let path = self.token_path();
        Self::ensure_parent(&path)?;
        let file = TokenFile {
            version: 1,
            tokens: tokens.clone(),
            saved_at: DateTime::<Utc>::from(std::time::SystemTime::now()),
        };
        let serialized = serde_json::to_string_pretty(&file)?;
        fs::write(&path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let path = self.token_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenFile {
    version: u32,
    tokens: AuthTokens,
    saved_at: DateTime<Utc>,
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<AuthTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a pair directly, bypassing save-time validation. Tests use this
    /// to set up states a well-behaved writer would never produce.
    pub fn seed(&self, tokens: AuthTokens) {
        *self.tokens.lock().expect("store lock poisoned") = Some(tokens);
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthTokens>, AuthError> {
        Ok(self.tokens.lock().expect("store lock poisoned").clone())
    }

    fn save(&self, tokens: &AuthTokens) -> Result<(), AuthError> {
        if !tokens.is_complete() {
            return Err(AuthError::IncompleteTokens);
        }
        *self.tokens.lock().expect("store lock poisoned") = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.tokens.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

fn default_jobline_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".jobline"))
        .unwrap_or_else(|| PathBuf::from(".jobline"))
}
