//! Process execution
//!
//! This module provides the [`Shell`] capability through which every external tool is
//! invoked, and [`SystemShell`], the implementation that spawns real child processes.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::types::{ChoresError, ChoresResult};

/// A literal shell command line plus how its output is connected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub line: String,
    /// Let the child read from the invoking terminal. Output is streamed live
    /// either way.
    pub tty: bool,
}

impl CommandInvocation {
    pub fn new(line: impl Into<String>, tty: bool) -> Self {
        Self {
            line: line.into(),
            tty,
        }
    }
}

/// Capability for running shell command lines.
///
/// Task sequencing only ever talks to this trait, so tests substitute a recording fake.
pub trait Shell {
    /// Run the command to completion and return its exit code
    fn run(&self, invocation: &CommandInvocation) -> ChoresResult<i32>;

    /// Run the command and return its trimmed standard output.
    ///
    /// A non-zero exit is reported as [`ChoresError::CommandFailed`].
    fn capture(&self, invocation: &CommandInvocation) -> ChoresResult<String>;
}

/// Spawns commands through the platform shell inside a working directory
pub struct SystemShell {
    working_dir: PathBuf,
}

impl SystemShell {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn command(&self, line: &str) -> Command {
        let mut command = if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(line);
            command
        } else {
            let mut command = Command::new("sh");
            command.arg("-c").arg(line);
            command
        };
        command.current_dir(&self.working_dir);
        command
    }

    fn spawn_error(line: &str, source: std::io::Error) -> ChoresError {
        ChoresError::CommandSpawn {
            command: line.to_string(),
            source,
        }
    }
}

impl Shell for SystemShell {
    fn run(&self, invocation: &CommandInvocation) -> ChoresResult<i32> {
        let mut command = self.command(&invocation.line);
        tracing::debug!(command = %invocation.line, tty = invocation.tty, "spawning");

        // Output goes straight to the invoking terminal while the child runs
        if !invocation.tty {
            command.stdin(Stdio::null());
        }
        let status = command
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Self::spawn_error(&invocation.line, e))?;

        Ok(exit_code(status))
    }

    fn capture(&self, invocation: &CommandInvocation) -> ChoresResult<String> {
        tracing::debug!(command = %invocation.line, "capturing output");

        let output = self
            .command(&invocation.line)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Self::spawn_error(&invocation.line, e))?;

        let code = exit_code(output.status);
        if code != 0 {
            return Err(ChoresError::CommandFailed {
                command: invocation.line.clone(),
                code,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Map a child's status to the code the invoking shell would report
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn run_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let shell = SystemShell::new(dir.path());

        assert_eq!(shell.run(&CommandInvocation::new("true", false)).unwrap(), 0);
        assert_eq!(
            shell.run(&CommandInvocation::new("exit 3", false)).unwrap(),
            3
        );
    }

    #[test]
    fn non_tty_run_gets_no_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let shell = SystemShell::new(dir.path());

        // `read` hits end of input at once instead of waiting on the terminal
        assert_eq!(
            shell
                .run(&CommandInvocation::new("read line; test -z \"$line\"", false))
                .unwrap(),
            0
        );
    }

    #[test]
    fn capture_trims_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let shell = SystemShell::new(dir.path());

        let out = shell
            .capture(&CommandInvocation::new("printf '1.4.2\\n'", false))
            .unwrap();
        assert_eq!(out, "1.4.2");
    }

    #[test]
    fn capture_fails_on_non_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let shell = SystemShell::new(dir.path());

        let err = shell
            .capture(&CommandInvocation::new("exit 4", false))
            .unwrap_err();
        assert!(matches!(err, ChoresError::CommandFailed { code: 4, .. }));
    }

    #[test]
    fn commands_run_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();
        let shell = SystemShell::new(dir.path());

        assert_eq!(
            shell
                .run(&CommandInvocation::new("test -f marker", false))
                .unwrap(),
            0
        );
    }
}
