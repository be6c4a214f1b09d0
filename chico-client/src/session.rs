//! Session persistence
//!
//! The auth token and the current-user snapshot are persisted together as
//! one JSON file and invalidated together: a 401 from the server means the
//! whole session is stale, never just the token.

use serde::{Deserialize, Serialize};
use shared::User;
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a session store under the given directory
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    /// Ensure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Save the session
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
    }

    /// Load the session, if any
    ///
    /// An unreadable or corrupt file counts as no session.
    pub fn load(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Check whether a session exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Invalidate the session (token and user snapshot together)
    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Storage path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
