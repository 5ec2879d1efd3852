//! Local cache errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors while writing or copying cached audio files.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A filesystem operation on `path` failed.
    #[error("Cache I/O failed for {path}: {source}")]
    Io {
        /// The file or directory being touched.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No cache directory could be determined for this platform.
    #[error("No cache directory available")]
    NoCacheDir,
}

impl CacheError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
