use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::wallet::session::SessionStorage;

/// Persists the connector session between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    session_path: PathBuf,
}

impl SessionStore {
    pub fn new(session_path: impl Into<PathBuf>) -> Self {
        Self {
            session_path: session_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(config.session_path()?))
    }

    /// Load the session from disk. Missing or unreadable files count as no session.
    pub fn load(&self) -> Option<SessionStorage> {
        if !self.session_path.exists() {
            return None;
        }
        let data = match fs::read_to_string(&self.session_path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Cannot read session file {}: {}", self.session_path.display(), e);
                return None;
            }
        };
        let value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                debug!("Session file is not JSON: {}", e);
                return None;
            }
        };
        SessionStorage::from_value(value)
    }

    /// Save the session to disk, creating the directory if needed.
    pub fn save(&self, storage: &SessionStorage) -> AppResult<()> {
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(storage)?;
        fs::write(&self.session_path, data)?;
        Ok(())
    }

    /// Remove the persisted session. A missing file is fine.
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.session_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.session_path
    }
}
