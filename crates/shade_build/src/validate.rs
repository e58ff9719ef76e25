//! Parallel validation of compiled binary artifacts.

use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use shade_common::TargetFormat;
use shade_config::BuildDescription;
use walkdir::WalkDir;

use crate::error::BuildError;
use crate::pool::build_pool;
use crate::process::{CommandLine, ProcessRunner};

/// Validation outcome for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactResult {
    /// Artifact path relative to the output directory.
    pub relative: PathBuf,
    /// `None` if the artifact passed; otherwise a short failure detail.
    pub failure: Option<String>,
}

impl ArtifactResult {
    /// Returns `true` if the validator accepted the artifact.
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for ArtifactResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "VALIDATION SUCCESS: {}", self.relative.display()),
            Some(detail) => write!(
                f,
                "VALIDATION FAILED ({}): {detail}",
                self.relative.display()
            ),
        }
    }
}

/// Results of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReport {
    /// The output directory holds no binary artifacts; nothing was built yet.
    NoArtifacts,
    /// Every artifact was checked, in path order.
    Completed(Vec<ArtifactResult>),
}

impl ValidationReport {
    /// Number of artifacts the validator rejected.
    pub fn failed_count(&self) -> usize {
        match self {
            ValidationReport::NoArtifacts => 0,
            ValidationReport::Completed(results) => {
                results.iter().filter(|r| !r.passed()).count()
            }
        }
    }
}

/// Collects every binary artifact under `output_dir`, sorted by path.
pub fn find_artifacts(output_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(output_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| TargetFormat::Spirv.matches_file_name(name))
        })
        .map(|e| e.into_path())
        .collect()
}

/// Runs the external validator over every binary artifact in parallel.
pub struct Validator<'a> {
    desc: &'a BuildDescription,
    runner: &'a dyn ProcessRunner,
    jobs: Option<usize>,
}

impl<'a> Validator<'a> {
    /// Creates a validator. `jobs` overrides the default worker count.
    pub fn new(
        desc: &'a BuildDescription,
        runner: &'a dyn ProcessRunner,
        jobs: Option<usize>,
    ) -> Self {
        Self { desc, runner, jobs }
    }

    /// Validates every artifact and reports each result.
    pub fn run(&self) -> Result<ValidationReport, BuildError> {
        let artifacts = find_artifacts(&self.desc.output_dir);
        if artifacts.is_empty() {
            return Ok(ValidationReport::NoArtifacts);
        }
        log::info!("validating {} SPIR-V files", artifacts.len());

        let pool = build_pool(self.jobs)?;
        let results: Vec<ArtifactResult> = pool.install(|| {
            artifacts
                .par_iter()
                .map(|artifact| self.check(artifact))
                .collect()
        });
        Ok(ValidationReport::Completed(results))
    }

    /// The validator invocation for one artifact.
    pub fn command(&self, artifact: &Path) -> CommandLine {
        let toolchain = &self.desc.toolchain;
        CommandLine::new(&toolchain.validator)
            .args(toolchain.validator_options.iter().cloned())
            .arg(artifact.display().to_string())
    }

    fn check(&self, artifact: &Path) -> ArtifactResult {
        let relative = artifact
            .strip_prefix(&self.desc.output_dir)
            .unwrap_or(artifact)
            .to_path_buf();

        let failure = match self.runner.run(&self.command(artifact)) {
            Ok(out) if out.success() => None,
            Ok(out) => Some(
                out.first_diagnostic_line()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("exit status {}", out.status_text())),
            ),
            Err(e) => Some(format!("cannot start {}: {e}", self.desc.toolchain.validator)),
        };
        ArtifactResult { relative, failure }
    }
}
