//! JSON file snapshot source

use super::traits::{Snapshot, SnapshotSource};
use crate::error::SourceError;
use std::path::{Path, PathBuf};

/// Reads a [`Snapshot`] from a JSON file on every call
///
/// The file is re-read each time so an external process can keep it current.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn snapshot(&self) -> Result<Snapshot, SourceError> {
        let path_str = self.path.display().to_string();
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|_| SourceError::NotFound(path_str.clone()))?;

        let snapshot: Snapshot =
            serde_json::from_str(&contents).map_err(|e| SourceError::Parse {
                path: path_str,
                message: e.to_string(),
            })?;

        log::debug!(
            "Read snapshot from {}: {} readings, {} calibrations, battery {:?}",
            self.path.display(),
            snapshot.readings.len(),
            snapshot.calibrations.len(),
            snapshot.battery_level
        );

        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
