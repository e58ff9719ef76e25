//! `shadebuild commands`: list compiler invocations without running them.

use shade_build::{compile_command, output_path, plan_tasks};
use shade_config::BuildDescription;

use crate::project::load_project;
use crate::{CommandsArgs, GlobalArgs};

/// Prints, or writes to `--output`, one compiler command line per planned task.
pub fn run(args: &CommandsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let desc = load_project(&args.project.config)?;
    let listing = render_commands(&desc);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &listing)?;
            if !global.quiet {
                println!(
                    "Wrote {} commands to {}.",
                    listing.lines().count(),
                    path.display()
                );
            }
        }
        None => print!("{listing}"),
    }
    Ok(0)
}

fn render_commands(desc: &BuildDescription) -> String {
    plan_tasks(desc)
        .iter()
        .map(|task| {
            let output = output_path(desc, task);
            format!("{}\n", compile_command(desc, task, &output))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn one_line_per_task() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lit.slang"), "// [moe(vertex, fragment)]\n").unwrap();
        fs::write(dir.path().join("util.slang"), "float f() { return 1; }\n").unwrap();
        let desc = BuildDescription::with_defaults(dir.path().to_path_buf());

        let listing = render_commands(&desc);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.starts_with("slangc ")));
        assert!(lines[0].contains("-stage vertex"));
        assert!(lines[0].ends_with("lit.vert.spv"));
        assert!(lines[3].contains("-entry fragmentMain"));
        assert!(lines[3].contains("lit.frag.glsl"));
    }

    #[test]
    fn nothing_planned_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let desc = BuildDescription::with_defaults(dir.path().to_path_buf());
        assert!(render_commands(&desc).is_empty());
    }
}
