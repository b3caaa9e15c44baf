//! History Manager for Briar.
//!
//! Appends every finished navigation to a plain-text log, one url per line.
//! Writes are synchronous and the file is only ever appended to.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::types::errors::HistoryError;

/// Trait defining history log operations.
pub trait HistoryManagerTrait {
    fn record_visit(&mut self, url: &str) -> Result<(), HistoryError>;
    fn list_history(&self) -> Result<Vec<String>, HistoryError>;
    fn is_recording_enabled(&self) -> bool;
    fn set_recording_enabled(&mut self, enabled: bool);
    fn path(&self) -> &Path;
}

/// History log backed by a text file.
pub struct HistoryManager {
    path: PathBuf,
    recording_enabled: bool,
}

impl HistoryManager {
    pub fn new(path: impl Into<PathBuf>, recording_enabled: bool) -> Self {
        Self {
            path: path.into(),
            recording_enabled,
        }
    }
}

impl HistoryManagerTrait for HistoryManager {
    fn record_visit(&mut self, url: &str) -> Result<(), HistoryError> {
        if !self.recording_enabled {
            return Err(HistoryError::Disabled);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                HistoryError::IoError(format!("{}: {}", parent.display(), e))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| HistoryError::IoError(format!("{}: {}", self.path.display(), e)))?;
        writeln!(file, "{}", url)
            .map_err(|e| HistoryError::IoError(format!("{}: {}", self.path.display(), e)))?;

        trace!(%url, "history entry appended");
        Ok(())
    }

    /// Reads the log back; a missing file is an empty history.
    fn list_history(&self) -> Result<Vec<String>, HistoryError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(HistoryError::IoError(format!("{}: {}", self.path.display(), e))),
        }
    }

    fn is_recording_enabled(&self) -> bool {
        self.recording_enabled
    }

    fn set_recording_enabled(&mut self, enabled: bool) {
        self.recording_enabled = enabled;
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
