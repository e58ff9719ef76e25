//! `shadebuild`: incremental shader compilation front end.
//!
//! `shadebuild build` compiles every annotated shader whose import closure
//! changed since the last run, `clean` removes generated artifacts,
//! `rebuild` does both, `validate` runs the SPIR-V validator over the
//! output directory and `commands` prints the compiler invocations without
//! running them.

#![warn(missing_docs)]

mod build;
mod clean;
mod commands;
mod project;
mod validate;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

/// Incremental shader build pipeline.
#[derive(Parser, Debug)]
#[command(name = "shadebuild", version, about = "Incremental Slang shader builds")]
pub struct Cli {
    /// Suppress all output except results and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of worker threads (defaults to the CPU count, at least 4).
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile shaders whose sources or imports changed.
    Build(ProjectArgs),
    /// Remove generated artifacts and the build manifest.
    Clean(ProjectArgs),
    /// Clean, then build everything.
    Rebuild(ProjectArgs),
    /// Run the SPIR-V validator over every compiled artifact.
    Validate(ProjectArgs),
    /// Print the compiler command line of every planned task.
    Commands(CommandsArgs),
}

/// Selects the build configuration file.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Path to the JSON build configuration.
    #[arg(default_value = shade_config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// Arguments for `shadebuild commands`.
#[derive(Args, Debug)]
pub struct CommandsArgs {
    /// Configuration selection.
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Write the command lines to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress progress banners and summaries.
    pub quiet: bool,
    /// Worker-count override.
    pub jobs: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        jobs: cli.jobs,
    };

    let result = match cli.command {
        Command::Build(ref args) => build::run(args, &global),
        Command::Clean(ref args) => clean::run(args, &global),
        Command::Rebuild(ref args) => build::rebuild(args, &global),
        Command::Validate(ref args) => validate::run(args, &global),
        Command::Commands(ref args) => commands::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Default log filter for the given flags; `RUST_LOG` still wins.
fn log_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(log_level(quiet, verbose));
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_build_default_config() {
        let cli = Cli::parse_from(["shadebuild", "build"]);
        match cli.command {
            Command::Build(ref args) => {
                assert_eq!(args.config, PathBuf::from("shaders.json"));
            }
            _ => panic!("expected Build command"),
        }
        assert!(cli.jobs.is_none());
    }

    #[test]
    fn parse_validate_with_config() {
        let cli = Cli::parse_from(["shadebuild", "validate", "engine/shaders.json"]);
        match cli.command {
            Command::Validate(ref args) => {
                assert_eq!(args.config, PathBuf::from("engine/shaders.json"));
            }
            _ => panic!("expected Validate command"),
        }
    }

    #[test]
    fn parse_commands_with_output() {
        let cli = Cli::parse_from(["shadebuild", "commands", "--output", "cmds.txt"]);
        match cli.command {
            Command::Commands(ref args) => {
                assert_eq!(args.output, Some(PathBuf::from("cmds.txt")));
                assert_eq!(args.project.config, PathBuf::from("shaders.json"));
            }
            _ => panic!("expected Commands command"),
        }
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["shadebuild", "rebuild", "-q", "-j", "8"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.jobs, Some(8));
        assert!(matches!(cli.command, Command::Rebuild(_)));
    }

    #[test]
    fn parse_clean() {
        let cli = Cli::parse_from(["shadebuild", "--verbose", "clean"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Clean(_)));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["shadebuild", "deploy"]).is_err());
        assert!(Cli::try_parse_from(["shadebuild"]).is_err());
    }

    #[test]
    fn log_level_from_flags() {
        assert_eq!(log_level(false, false), "warn");
        assert_eq!(log_level(false, true), "debug");
        assert_eq!(log_level(true, true), "error");
    }
}
