//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// Most cache operations are fail-safe: a corrupt manifest loads as empty and
/// a failed save only costs a rebuild next time. `FileMissing` is the one
/// error that changes a build outcome.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A source file, or one of its transitive imports, could not be read
    /// while computing a fingerprint.
    #[error("file not found or unreadable: {path}: {source}")]
    FileMissing {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An I/O error occurred while reading or writing cache files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
