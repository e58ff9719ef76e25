//! Error types for configuration loading.

/// Errors that can occur when reading a `shaders.json` configuration.
///
/// Callers normally go through [`load_description`](crate::load_description),
/// which logs these and falls back to defaults.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The JSON content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),
}
