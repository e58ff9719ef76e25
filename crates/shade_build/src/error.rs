//! Error types for build orchestration.

use std::path::PathBuf;

/// Errors that abort a whole command rather than a single task.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The worker pool could not be created.
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),

    /// A filesystem operation on the output directory failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
