//! `shadebuild clean`.

use shade_config::BuildDescription;

use crate::project::load_project;
use crate::{GlobalArgs, ProjectArgs};

/// Removes generated artifacts and the manifest from the output directory.
pub fn run(args: &ProjectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let desc = load_project(&args.config)?;
    clean_project(&desc, global)?;
    Ok(0)
}

pub(crate) fn clean_project(
    desc: &BuildDescription,
    global: &GlobalArgs,
) -> Result<usize, Box<dyn std::error::Error>> {
    let removed = shade_build::clean_outputs(&desc.output_dir)?;
    if !global.quiet {
        println!(
            "Clean successful. Removed {removed} files from {}.",
            desc.output_dir.display()
        );
    }
    Ok(removed)
}
