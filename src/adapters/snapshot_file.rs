//! File-backed catalog source for offline and replay runs.
//!
//! A snapshot previously written with `--record-snapshot` (thumbnails
//! base64-inlined) is loaded instead of hitting the live API. Useful for
//! testing layout changes without network access.

use std::path::PathBuf;

use crate::catalog::StoreSnapshot;
use crate::error::StoreError;
use crate::ports::catalog_source::{CatalogSource, FetchFuture};

/// Catalog source that reads a recorded snapshot file.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Create a source backed by the given snapshot file.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<StoreSnapshot, StoreError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::Config(format!("failed to read snapshot {}: {e}", self.path.display()))
        })?;
        let snapshot: StoreSnapshot = serde_json::from_str(&contents).map_err(|e| {
            StoreError::Config(format!("failed to parse snapshot {}: {e}", self.path.display()))
        })?;
        Ok(snapshot.into_grouped())
    }
}

impl CatalogSource for SnapshotFile {
    fn fetch(&self) -> FetchFuture<'_> {
        let result = self.load();
        Box::pin(async move { result })
    }
}

/// Serialize a snapshot to pretty JSON for later replay.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn record_snapshot(snapshot: &StoreSnapshot, path: &std::path::Path) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| StoreError::Config(format!("failed to serialize snapshot: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}
