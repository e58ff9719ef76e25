//! Incremental build cache management.
//!
//! This crate provides the dependency-aware fingerprint of a shader source
//! (its own bytes plus every transitively imported module) and the persisted
//! manifest mapping each build task to the fingerprint it was last built
//! from.

#![warn(missing_docs)]

pub mod error;
pub mod hasher;
pub mod manifest;

pub use error::CacheError;
pub use hasher::DependencyHasher;
pub use manifest::{BuildManifest, TaskKey, MANIFEST_FILE};
