//! Snapshot cache for remote fetches.
//!
//! A successful API pull is written to a JSON snapshot next to the other
//! dashboard state. Repeat runs inside the TTL read the snapshot instead
//! of hitting the API again.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use nd_core::Entry;
use serde::{Deserialize, Serialize};

use crate::SourceError;

/// A cached remote fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the remote data was fetched.
    pub fetched_at: DateTime<Utc>,
    pub entries: Vec<Entry>,
}

/// File-backed snapshot store with a freshness TTL.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// Where the snapshot lives on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored snapshot regardless of age.
    ///
    /// Returns `None` if nothing has been stored yet.
    pub fn load(&self) -> Result<Option<Snapshot>, SourceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let snapshot = serde_json::from_str(&content).map_err(|source| {
                    SourceError::InvalidSnapshot {
                        path: self.path.clone(),
                        source,
                    }
                })?;
                Ok(Some(snapshot))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Loads the stored snapshot only if it is still within the TTL.
    pub fn load_fresh(&self, now: DateTime<Utc>) -> Result<Option<Snapshot>, SourceError> {
        let Some(snapshot) = self.load()? else {
            return Ok(None);
        };
        if self.is_fresh(&snapshot, now) {
            Ok(Some(snapshot))
        } else {
            tracing::debug!(path = %self.path.display(), "snapshot is stale");
            Ok(None)
        }
    }

    /// Whether `snapshot` is still within the TTL at `now`.
    ///
    /// A snapshot exactly at the TTL boundary still counts as fresh, and
    /// one stamped in the future (clock skew) is never treated as stale.
    #[must_use]
    pub fn is_fresh(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(self.ttl) else {
            // A TTL beyond chrono's range never expires.
            return true;
        };
        now.signed_duration_since(snapshot.fetched_at) <= ttl
    }

    /// Writes a snapshot, creating parent directories as needed.
    pub fn store(&self, snapshot: &Snapshot) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SourceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(snapshot).map_err(|source| {
            SourceError::InvalidSnapshot {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), entries = snapshot.entries.len(), "stored snapshot");
        Ok(())
    }
}
