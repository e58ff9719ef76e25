//! External process invocation.

use std::fmt;
use std::process::Command;

use shade_common::ProcessOutput;

/// A program and its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Program name or path.
    pub program: String,
    /// Arguments, one element per argv entry.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Creates a command line with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external tools on behalf of the schedulers.
///
/// Implementations are shared across worker threads. A call blocks its worker
/// until the process exits.
pub trait ProcessRunner: Send + Sync {
    /// Runs `command` to completion and returns its exit status and captured
    /// output. `Err` means the process could not be started at all.
    fn run(&self, command: &CommandLine) -> std::io::Result<ProcessOutput>;
}

/// Runs commands as real child processes with captured output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> std::io::Result<ProcessOutput> {
        log::debug!("running {command}");
        let output = Command::new(&command.program)
            .args(&command.args)
            .output()?;
        Ok(ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_with_spaces() {
        let cmd = CommandLine::new("slangc")
            .arg("a.slang")
            .args(["-target", "spirv"]);
        assert_eq!(cmd.to_string(), "slangc a.slang -target spirv");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let cmd = CommandLine::new("definitely-not-a-real-shader-compiler-xyz");
        assert!(SystemRunner.run(&cmd).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn captures_status_and_output() {
        let cmd = CommandLine::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]);
        let output = SystemRunner.run(&cmd).unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }
}
