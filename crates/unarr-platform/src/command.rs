use crate::error::{Error, Result};
use crate::process::ProcessHandle;
use std::ffi::OsStr;
use std::process::{Output, Stdio};
use tokio::process::Command as TokioCommand;

#[derive(Debug)]
pub struct Command {
    inner: TokioCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            inner: TokioCommand::new(program),
            program: program.to_string_lossy().into_owned(),
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

    /// Run to completion and capture both output streams whole.
    pub async fn output(mut self) -> Result<Output> {
        self.inner
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::spawn(&self.program, e))
    }

    /// Spawn with piped output streams, delivered as chunks through the handle.
    pub fn spawn_piped(mut self) -> Result<ProcessHandle> {
        let child = self
            .inner
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::spawn(&self.program, e))?;

        ProcessHandle::start(self.program, child)
    }

    #[cfg(test)]
    fn as_std(&self) -> &std::process::Command {
        self.inner.as_std()
    }
}
