//! Parallel incremental compilation.
//!
//! Each task fingerprints its source's import closure, compares it with the
//! previous manifest, and either skips, compiles, or fails. Tasks are
//! independent; only the coordinating thread touches the new manifest.

use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use shade_cache::{BuildManifest, CacheError, DependencyHasher};
use shade_common::{Fingerprint, ProcessOutput};
use shade_config::BuildDescription;
use shade_source::ModuleResolver;

use crate::error::BuildError;
use crate::plan::{compile_command, output_path, BuildTask};
use crate::pool::build_pool;
use crate::process::{CommandLine, ProcessRunner};

/// Why a task failed.
#[derive(Debug)]
pub enum TaskError {
    /// The source or one of its transitive imports could not be read.
    Fingerprint(CacheError),
    /// The artifact's directory could not be created.
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The compiler could not be started.
    Spawn {
        /// The command that failed to start.
        command: CommandLine,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The compiler ran and exited unsuccessfully.
    Compiler {
        /// The full command line.
        command: CommandLine,
        /// Exit status and captured output.
        output: ProcessOutput,
    },
}

/// Outcome of one task.
#[derive(Debug)]
pub enum TaskOutcome {
    /// Fingerprint unchanged and the artifact is still on disk.
    Skipped,
    /// The compiler ran successfully.
    Built,
    /// The task failed; it gets no manifest entry and is retried next run.
    Failed(TaskError),
}

/// A task together with its outcome.
#[derive(Debug)]
pub struct TaskResult {
    /// The task that ran.
    pub task: BuildTask,
    /// Where its artifact lives.
    pub output: PathBuf,
    /// Fingerprint the task was checked or built against, when computable.
    pub fingerprint: Option<Fingerprint>,
    /// What happened.
    pub outcome: TaskOutcome,
}

impl TaskResult {
    /// Returns `true` if the task failed.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, TaskOutcome::Failed(_))
    }

    /// Fingerprint to record in the next manifest: present for skipped and
    /// built tasks only.
    pub fn recorded_fingerprint(&self) -> Option<Fingerprint> {
        match self.outcome {
            TaskOutcome::Skipped | TaskOutcome::Built => self.fingerprint,
            TaskOutcome::Failed(_) => None,
        }
    }

    /// Renders the one-line status report, with the artifact shown relative
    /// to `output_dir`.
    pub fn display<'a>(&'a self, output_dir: &'a Path) -> impl fmt::Display + 'a {
        ResultLine {
            result: self,
            output_dir,
        }
    }
}

struct ResultLine<'a> {
    result: &'a TaskResult,
    output_dir: &'a Path,
}

impl fmt::Display for ResultLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rel = self
            .result
            .output
            .strip_prefix(self.output_dir)
            .unwrap_or(&self.result.output)
            .display();
        match &self.result.outcome {
            TaskOutcome::Skipped => write!(f, "SKIP: {rel} (Hash Match)"),
            TaskOutcome::Built => write!(f, "BUILD: {rel}"),
            TaskOutcome::Failed(TaskError::Fingerprint(_)) => write!(
                f,
                "ERROR: File not found or included file missing: {}",
                self.result.task.source.display()
            ),
            TaskOutcome::Failed(TaskError::OutputDir { path, source }) => write!(
                f,
                "ERROR: Cannot create output directory {} (Output: {rel}): {source}",
                path.display()
            ),
            TaskOutcome::Failed(TaskError::Spawn { command, source }) => write!(
                f,
                "ERROR: Cannot start compiler: {source} (Output: {rel}): {command}"
            ),
            TaskOutcome::Failed(TaskError::Compiler { command, output }) => write!(
                f,
                "ERROR: Command failed with status {} (Output: {rel}): {command}",
                output.status_text()
            ),
        }
    }
}

/// Results of one build run.
#[derive(Debug)]
pub struct BuildReport {
    /// One result per planned task, in plan order.
    pub results: Vec<TaskResult>,
    /// The manifest to persist: one entry per skipped or built task.
    pub manifest: BuildManifest,
}

impl BuildReport {
    /// Number of tasks that failed.
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_error()).count()
    }

    /// Number of tasks that invoked the compiler successfully.
    pub fn built_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, TaskOutcome::Built))
            .count()
    }

    /// Number of tasks that were up to date.
    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, TaskOutcome::Skipped))
            .count()
    }
}

/// Fans build tasks out over a worker pool.
pub struct TaskScheduler<'a> {
    desc: &'a BuildDescription,
    hasher: DependencyHasher,
    runner: &'a dyn ProcessRunner,
    jobs: Option<usize>,
}

impl<'a> TaskScheduler<'a> {
    /// Creates a scheduler. `jobs` overrides the default worker count.
    pub fn new(
        desc: &'a BuildDescription,
        runner: &'a dyn ProcessRunner,
        jobs: Option<usize>,
    ) -> Self {
        let resolver = ModuleResolver::new(desc.include_dirs.clone());
        Self {
            desc,
            hasher: DependencyHasher::new(resolver),
            runner,
            jobs,
        }
    }

    /// Runs every task against the previous manifest.
    ///
    /// A failing task never stops its siblings. The returned manifest holds
    /// exactly the tasks that were skipped or built in this run, so entries
    /// for vanished or failed tasks are dropped.
    pub fn run(
        &self,
        tasks: &[BuildTask],
        previous: &BuildManifest,
    ) -> Result<BuildReport, BuildError> {
        let pool = build_pool(self.jobs)?;
        let results: Vec<TaskResult> = pool.install(|| {
            tasks
                .par_iter()
                .map(|task| self.execute(task, previous))
                .collect()
        });

        let mut manifest = BuildManifest::new();
        for result in &results {
            if let Some(fingerprint) = result.recorded_fingerprint() {
                manifest.record(result.task.key(), fingerprint);
            }
        }

        Ok(BuildReport { results, manifest })
    }

    /// Processes a single task on the current worker.
    pub fn execute(&self, task: &BuildTask, previous: &BuildManifest) -> TaskResult {
        let output = output_path(self.desc, task);
        let finish = |fingerprint, outcome| TaskResult {
            task: task.clone(),
            output: output.clone(),
            fingerprint,
            outcome,
        };

        let fingerprint = match self.hasher.fingerprint(&task.source) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                log::debug!("{e}");
                return finish(None, TaskOutcome::Failed(TaskError::Fingerprint(e)));
            }
        };

        if previous.matches(&task.key(), &fingerprint) && output.exists() {
            log::debug!("{} is up to date", output.display());
            return finish(Some(fingerprint), TaskOutcome::Skipped);
        }

        if let Some(dir) = output.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                let error = TaskError::OutputDir {
                    path: dir.to_path_buf(),
                    source: e,
                };
                return finish(Some(fingerprint), TaskOutcome::Failed(error));
            }
        }

        let command = compile_command(self.desc, task, &output);
        let outcome = match self.runner.run(&command) {
            Ok(out) if out.success() => TaskOutcome::Built,
            Ok(out) => {
                if let Some(line) = out.first_diagnostic_line() {
                    log::warn!("{}: {line}", task.source.display());
                }
                TaskOutcome::Failed(TaskError::Compiler {
                    command,
                    output: out,
                })
            }
            Err(e) => TaskOutcome::Failed(TaskError::Spawn { command, source: e }),
        };
        finish(Some(fingerprint), outcome)
    }
}

/// Runs and records one complete build of the planned `tasks`.
///
/// The previous manifest is loaded from the output directory, every task
/// runs, and the new manifest replaces the old one. A manifest that cannot
/// be written is logged and ignored: the next build simply redoes the work.
/// An empty task list runs nothing and leaves the manifest untouched.
pub fn build(
    desc: &BuildDescription,
    tasks: &[BuildTask],
    runner: &dyn ProcessRunner,
    jobs: Option<usize>,
) -> Result<BuildReport, BuildError> {
    if tasks.is_empty() {
        return Ok(BuildReport {
            results: Vec::new(),
            manifest: BuildManifest::new(),
        });
    }
    log::info!(
        "executing {} compilation tasks into {}",
        tasks.len(),
        desc.output_dir.display()
    );

    let previous = BuildManifest::load(&desc.output_dir);
    let report = TaskScheduler::new(desc, runner, jobs).run(tasks, &previous)?;

    if let Err(e) = report.manifest.save(&desc.output_dir) {
        log::warn!("could not write build manifest: {e}");
    }
    Ok(report)
}
