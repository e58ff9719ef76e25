//! Task planning, output-path derivation and compiler command construction.

use std::path::{Path, PathBuf};

use shade_cache::TaskKey;
use shade_common::{Stage, TargetFormat};
use shade_config::BuildDescription;
use shade_source::{discover_sources, stages_for};

use crate::process::CommandLine;

/// One unit of compilation: a source file compiled for one stage into one
/// target format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildTask {
    /// Absolute path of the source file.
    pub source: PathBuf,
    /// Pipeline stage being compiled.
    pub stage: Stage,
    /// Output encoding.
    pub target: TargetFormat,
}

impl BuildTask {
    /// Creates a task.
    pub fn new(source: PathBuf, stage: Stage, target: TargetFormat) -> Self {
        Self {
            source,
            stage,
            target,
        }
    }

    /// Manifest key of this task.
    pub fn key(&self) -> TaskKey {
        TaskKey::new(&self.source, self.stage, self.target)
    }
}

/// Plans every task for the configured include directories.
///
/// Sources are enumerated across the include directories; each declared stage
/// is crossed with every target format. Files without a stage annotation
/// contribute nothing. Every task in the result is distinct.
pub fn plan_tasks(desc: &BuildDescription) -> Vec<BuildTask> {
    let mut tasks = Vec::new();
    for source in discover_sources(&desc.include_dirs) {
        for stage in stages_for(&source) {
            for target in TargetFormat::ALL {
                tasks.push(BuildTask::new(source.clone(), stage, target));
            }
        }
    }
    tasks
}

/// Derives the artifact path for a task.
///
/// The source's path relative to the first include directory containing it
/// (or, failing that, relative to the root directory) is re-parented under the
/// output directory, and the file is named `<stem>.<stage>.<target>`, for
/// example `post/bloom.frag.spv`. A source outside every known directory lands
/// directly in the output directory.
pub fn output_path(desc: &BuildDescription, task: &BuildTask) -> PathBuf {
    let relative_dir = desc
        .include_dirs
        .iter()
        .chain(std::iter::once(&desc.root_dir))
        .find_map(|dir| task.source.strip_prefix(dir).ok())
        .and_then(Path::parent)
        .unwrap_or(Path::new(""));

    desc.output_dir
        .join(relative_dir)
        .join(output_file_name(task))
}

fn output_file_name(task: &BuildTask) -> String {
    let stem = task
        .source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!(
        "{stem}.{}.{}",
        task.stage.suffix(),
        task.target.suffix()
    )
}

/// Builds the compiler invocation that turns `task` into `output`.
pub fn compile_command(desc: &BuildDescription, task: &BuildTask, output: &Path) -> CommandLine {
    let toolchain = &desc.toolchain;
    let mut cmd = CommandLine::new(&toolchain.compiler)
        .arg(task.source.display().to_string())
        .args(["-target", task.target.name()])
        .args(["-profile", toolchain.profile.as_str()])
        .args(["-stage", task.stage.name()]);
    for dir in &desc.include_dirs {
        cmd = cmd.arg("-I").arg(dir.display().to_string());
    }
    cmd.args(["-entry", task.stage.entry_point()])
        .args(toolchain.compiler_options.iter().cloned())
        .arg("-o")
        .arg(output.display().to_string())
}
