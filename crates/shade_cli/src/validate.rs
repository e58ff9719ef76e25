//! `shadebuild validate`: run the SPIR-V validator over the output directory.

use shade_build::{SystemRunner, ValidationReport, Validator};

use crate::project::load_project;
use crate::{GlobalArgs, ProjectArgs};

/// Validates every `.spv` artifact.
///
/// Returns exit code 1 if the validator rejected any artifact. An output
/// directory without artifacts is not a failure.
pub fn run(args: &ProjectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let desc = load_project(&args.config)?;
    let report = Validator::new(&desc, &SystemRunner, global.jobs).run()?;

    let results = match report {
        ValidationReport::NoArtifacts => {
            println!("No .spv files found to validate. Run 'build' first.");
            return Ok(0);
        }
        ValidationReport::Completed(ref results) => results,
    };

    if !global.quiet {
        println!("Validating {} SPIR-V files...", results.len());
        println!("{}", "-".repeat(40));
    }
    for result in results {
        println!("{result}");
    }

    let failed = report.failed_count();
    if !global.quiet {
        println!("{}", "-".repeat(40));
    }
    if failed > 0 {
        println!("Validation finished with {failed} failures.");
        Ok(1)
    } else {
        println!("All SPIR-V files passed validation.");
        Ok(0)
    }
}
