//! On-disk session cache.
//!
//! Persists the current session as JSON in the platform data directory so
//! a restart can restore it without new credentials. The cache is an
//! implementation detail of the HTTP adapter; in-process providers do not
//! persist anything.

use std::path::PathBuf;

use fs_err as fs;

use crate::{AuthError, Session};

/// File-backed store for the persisted session.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// Create a cache at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default cache location under the platform data directory.
    ///
    /// `None` when the platform exposes no data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("vestibule").join("session.json"))
    }

    /// Path this cache reads and writes.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the persisted session, if any.
    ///
    /// A missing file means no session. A corrupt file is discarded and
    /// also treated as no session; restoring must never block startup.
    ///
    /// # Errors
    ///
    /// Returns an error only on I/O failure other than a missing file.
    pub fn load(&self) -> Result<Option<Session>, AuthError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding corrupt session cache");
                self.clear()?;
                Ok(None)
            },
        }
    }

    /// Persist a session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory or file cannot be written.
    pub fn store(&self, session: &Session) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the persisted session. Missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure other than a missing file.
    pub fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
