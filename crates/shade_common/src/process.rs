//! Structured result of running an external tool.

/// Exit status and captured output of one external process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    /// Captured standard output (lossily decoded).
    pub stdout: String,
    /// Captured standard error (lossily decoded).
    pub stderr: String,
}

impl ProcessOutput {
    /// Returns `true` if the process exited with code 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Human-readable exit status (`"1"`, or `"signal"` when killed).
    pub fn status_text(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }

    /// First non-empty line of diagnostics, preferring stderr over stdout.
    pub fn first_diagnostic_line(&self) -> Option<&str> {
        self.stderr
            .lines()
            .chain(self.stdout.lines())
            .map(str::trim)
            .find(|l| !l.is_empty())
    }
}
