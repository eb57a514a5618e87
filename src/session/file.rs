use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::TokenStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(rename = "education_crm_token")]
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

/// Token store persisted as a small JSON file, surviving process restarts.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full stored record, or `None` when absent or unreadable
    pub fn load(&self) -> Option<StoredSession> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("failed to read session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<StoredSession>(&content) {
            Ok(session) if !session.token.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("ignoring malformed session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Readers see either the previous file or the new one, never a partial write
    fn save(&self, token: &str) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let session = StoredSession {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&session)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(content.as_bytes())?;
        staged.flush()?;
        staged.persist(&self.path)?;
        Ok(())
    }

    fn remove(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn set_token(&self, value: Option<&str>) {
        let result = match value.filter(|v| !v.is_empty()) {
            Some(token) => self.save(token),
            None => self.remove(),
        };

        if let Err(e) = result {
            tracing::warn!("session storage unavailable at {}: {}", self.path.display(), e);
        }
    }

    fn get_token(&self) -> Option<String> {
        self.load().map(|session| session.token)
    }
}
