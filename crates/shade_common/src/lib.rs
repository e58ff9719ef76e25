//! Shared foundational types used across the shader build pipeline.
//!
//! This crate provides the fixed stage and target-format tables, the content
//! fingerprint type, and the structured result of an external process run.

#![warn(missing_docs)]

pub mod fingerprint;
pub mod path;
pub mod process;
pub mod stage;
pub mod target;

pub use fingerprint::{Fingerprint, FingerprintBuilder, ParseFingerprintError};
pub use path::absolutize;
pub use process::ProcessOutput;
pub use stage::{Stage, UnknownStage};
pub use target::TargetFormat;

/// File extension of shading-language source files (without the dot).
pub const SOURCE_EXTENSION: &str = "slang";
