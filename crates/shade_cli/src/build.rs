//! `shadebuild build` and `shadebuild rebuild`.

use std::io::{self, Write};

use shade_build::{plan_tasks, BuildReport, ProcessRunner, SystemRunner};
use shade_config::BuildDescription;

use crate::project::load_project;
use crate::{GlobalArgs, ProjectArgs};

/// Runs an incremental build.
///
/// Prints one line per task plus a summary. Returns exit code 1 if any task
/// failed; the manifest has already been written by then.
pub fn run(args: &ProjectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let desc = load_project(&args.config)?;
    build_project(&desc, global, &SystemRunner, &mut io::stdout().lock())
}

/// Removes every artifact, then builds from scratch.
pub fn rebuild(args: &ProjectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let desc = load_project(&args.config)?;
    crate::clean::clean_project(&desc, global)?;
    build_project(&desc, global, &SystemRunner, &mut io::stdout().lock())
}

fn build_project(
    desc: &BuildDescription,
    global: &GlobalArgs,
    runner: &dyn ProcessRunner,
    out: &mut dyn Write,
) -> Result<i32, Box<dyn std::error::Error>> {
    let tasks = plan_tasks(desc);
    if tasks.is_empty() {
        writeln!(out, "No .slang files found or no stages defined.")?;
        return Ok(0);
    }

    if !global.quiet {
        writeln!(out, "Executing {} compilation tasks...", tasks.len())?;
        writeln!(out, "{}", "-".repeat(40))?;
        out.flush()?;
    }
    let report = shade_build::build(desc, &tasks, runner, global.jobs)?;
    for result in &report.results {
        writeln!(out, "{}", result.display(&desc.output_dir))?;
    }
    if !global.quiet {
        writeln!(out, "{}", "-".repeat(40))?;
        writeln!(out, "{}", summary(&report))?;
    }

    Ok(if report.error_count() > 0 { 1 } else { 0 })
}

fn summary(report: &BuildReport) -> String {
    format!(
        "Build finished: {} built, {} up to date, {} failed.",
        report.built_count(),
        report.skipped_count(),
        report.error_count()
    )
}
