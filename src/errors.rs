//! Error types for the heart rate bridge
//!
//! File and network failures are contained where they happen: request
//! handlers turn them into a fallback value or a log line. Only lifecycle
//! errors (start/stop) are meant to reach the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Settings file could not be read, parsed or written.
    ///
    /// Callers recover by falling back to `Config::default()`.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Bpm file is missing or unreadable
    #[error("failed to read bpm file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bpm file was read but does not hold a decimal integer
    #[error("bpm file {} holds {content:?}, expected a decimal integer", .path.display())]
    InvalidContent { path: PathBuf, content: String },

    /// Writing a new value to the bpm file failed
    #[error("failed to write bpm file {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("server is already running")]
    AlreadyRunning,

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The serve task ended abnormally while being stopped
    #[error("failed to stop server: {0}")]
    Shutdown(String),
}

impl SyncError {
    /// True for the errors a GET falls back from (missing, unreadable or
    /// unparseable bpm file).
    pub fn is_file_access(&self) -> bool {
        matches!(
            self,
            SyncError::FileAccess { .. } | SyncError::InvalidContent { .. }
        )
    }
}
