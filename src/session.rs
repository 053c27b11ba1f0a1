//! Identity store
//!
//! Persists the username between runs. This is a display label for the
//! prompt and the login gate only; nothing verifies it.

use crate::error::{CyberError, CyberResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Identity {
    /// Build an identity from user input; whitespace is trimmed and an
    /// empty name is rejected
    pub fn new(username: &str) -> CyberResult<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CyberError::Session("Username cannot be empty".to_string()));
        }
        Ok(Self {
            username: username.to_string(),
            logged_in_at: Utc::now(),
        })
    }
}

/// File-backed store holding at most one identity
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/cyberstream/session.json`
    pub fn default_location() -> Self {
        Self::new(session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored identity; unreadable files count as logged out
    pub fn load(&self) -> Option<Identity> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!("No stored session at {:?}: {}", self.path, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("⚠️ Stored session is invalid, ignoring it: {}", e);
                None
            }
        }
    }

    pub fn save(&self, identity: &Identity) -> CyberResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(identity)?)?;
        Ok(())
    }

    pub fn clear(&self) -> CyberResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cyberstream")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_trims_and_rejects_empty() {
        assert_eq!(Identity::new("  neo ").unwrap().username, "neo");
        assert!(Identity::new("   ").is_err());
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested/session.json"));
        assert!(store.load().is_none());

        let identity = Identity::new("trinity").unwrap();
        store.save(&identity).unwrap();
        assert_eq!(store.load(), Some(identity));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_session_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(SessionStore::new(path).load().is_none());
    }
}
