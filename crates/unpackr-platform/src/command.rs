use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command as StdCommand, Output};

#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    /// Run `resolved` while keeping `program` as the reported name.
    pub fn resolved(program: impl Into<String>, resolved: PathBuf) -> Self {
        Self {
            inner: StdCommand::new(resolved),
            program: program.into(),
        }
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

    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.inner.env(key, val);
        self
    }

    /// Block until the program exits, capturing stdout and stderr.
    pub fn capture(mut self) -> Result<Output> {
        tracing::debug!(command = %self, "spawning");
        self.inner.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::CommandNotFound {
                cmd: self.program.clone(),
            },
            _ => Error::CommandFailed {
                cmd: self.program.clone(),
                source: e,
            },
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.inner.get_args() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
