//! Loading of the `shaders.json` build configuration.
//!
//! This crate reads the optional JSON configuration file and produces a
//! [`BuildDescription`]: the ordered include directories, the output
//! directory, and the [`Toolchain`] used to compile and validate shaders.
//! Configuration problems are never fatal; defaults are substituted.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_description, parse_description, DEFAULT_CONFIG_FILE};
pub use types::*;
