/// Persistent storage for the operator's access/refresh token pair.
///
/// Storage is a flat string key/value map holding exactly two keys,
/// `access_token` and `refresh_token`. The store is handed to the API client
/// explicitly; nothing reads tokens from a global.
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use wf_core::get_wf_setting;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Token storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Token storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("No config directory available for token storage")]
    NoConfigDir,
}

pub trait TokenStore: Send + Sync {
    /// The stored access token, if any
    fn access_token(&self) -> Option<String>;

    /// The stored refresh token, if any
    fn refresh_token(&self) -> Option<String>;

    /// Replace both tokens
    fn set(&self, access: &str, refresh: &str) -> Result<(), TokenStoreError>;

    /// Remove both tokens
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Token pair kept on disk as a small JSON object
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `WF_TOKEN_FILE` if set, otherwise `<config dir>/worker-factory/tokens.json`
    pub fn from_settings() -> Result<Self, TokenStoreError> {
        let configured = get_wf_setting!(WF_TOKEN_FILE);
        if !configured.trim().is_empty() {
            return Ok(Self::new(configured.trim()));
        }
        let dir = dirs::config_dir().ok_or(TokenStoreError::NoConfigDir)?;
        Ok(Self::new(dir.join("worker-factory").join("tokens.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), TokenStoreError> {
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        match self.read_map() {
            Ok(mut map) => map.remove(key),
            Err(e) => {
                log::warn!("Could not read tokens from {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY)
    }

    fn set(&self, access: &str, refresh: &str) -> Result<(), TokenStoreError> {
        // a corrupt file is overwritten rather than blocking sign-in
        let mut map = self.read_map().unwrap_or_default();
        map.insert(ACCESS_TOKEN_KEY.to_string(), access.to_string());
        map.insert(REFRESH_TOKEN_KEY.to_string(), refresh.to_string());
        self.write_map(&map)?;
        log::debug!("Stored token pair at {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut map = self.read_map().unwrap_or_default();
        map.remove(ACCESS_TOKEN_KEY);
        map.remove(REFRESH_TOKEN_KEY);
        self.write_map(&map)?;
        log::debug!("Cleared token pair at {}", self.path.display());
        Ok(())
    }
}

/// Process-local store for tests and throw-away sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    map: RwLock<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(ACCESS_TOKEN_KEY.to_string(), access.to_string());
        map.insert(REFRESH_TOKEN_KEY.to_string(), refresh.to_string());
        Self {
            map: RwLock::new(map),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.map
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY)
    }

    fn set(&self, access: &str, refresh: &str) -> Result<(), TokenStoreError> {
        let mut map = self
            .map
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.insert(ACCESS_TOKEN_KEY.to_string(), access.to_string());
        map.insert(REFRESH_TOKEN_KEY.to_string(), refresh.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut map = self
            .map
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.remove(ACCESS_TOKEN_KEY);
        map.remove(REFRESH_TOKEN_KEY);
        Ok(())
    }
}
