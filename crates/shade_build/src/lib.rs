//! Incremental shader compilation and validation.
//!
//! Plans one task per (source file, stage, target format), fingerprints each
//! task's import closure, and compiles only the tasks whose fingerprint or
//! output changed. A companion validator runs the binary-artifact checker over
//! everything in the output directory. External tools are reached through the
//! [`ProcessRunner`] trait so tests can substitute fakes.

#![warn(missing_docs)]

pub mod clean;
pub mod error;
pub mod plan;
pub mod pool;
pub mod process;
pub mod scheduler;
pub mod validate;

pub use clean::clean_outputs;
pub use error::BuildError;
pub use plan::{compile_command, output_path, plan_tasks, BuildTask};
pub use pool::{build_pool, default_jobs};
pub use process::{CommandLine, ProcessRunner, SystemRunner};
pub use scheduler::{build, BuildReport, TaskError, TaskOutcome, TaskResult, TaskScheduler};
pub use validate::{find_artifacts, ArtifactResult, ValidationReport, Validator};
