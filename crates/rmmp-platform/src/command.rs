use std::ffi::OsStr;
use std::process::{Command as StdCommand, ExitStatus, Output, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Thin wrapper over [`std::process::Command`] that remembers its program
/// name for error reporting.
#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            inner: StdCommand::new(&program),
            program,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    /// Program and arguments joined by spaces, for logs and messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(
                self.inner
                    .get_args()
                    .map(|a| a.to_string_lossy().into_owned()),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run with the caller's stdio attached and wait for completion.
    pub fn status(&mut self) -> Result<ExitStatus> {
        debug!(cmd = %self.display(), "running");
        self.inner
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| self.failed(e))
    }

    /// Run with stdout and stderr captured.
    pub fn output(&mut self) -> Result<Output> {
        debug!(cmd = %self.display(), "capturing");
        self.inner.output().map_err(|e| self.failed(e))
    }

    fn failed(&self, source: std::io::Error) -> Error {
        Error::CommandFailed {
            cmd: self.program.clone(),
            source,
        }
    }
}
