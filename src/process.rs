use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Whether a command's stdout/stderr reach the terminal or are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Inherit,
    Capture,
}

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub output: Output,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            output: Output::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn captured(mut self) -> Self {
        self.output = Output::Capture;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError>;
}

/// Runs commands on the host with `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        let mut c = Command::new(&cmd.program);
        c.args(&cmd.args);
        if let Some(dir) = &cmd.cwd {
            c.current_dir(dir);
        }
        debug!(command = %cmd, cwd = ?cmd.cwd, "spawning");

        let result = match cmd.output {
            Output::Capture => c
                .stdin(Stdio::null())
                .output()
                .await
                .map(|o| CommandOutput {
                    code: o.status.code(),
                    stdout: String::from_utf8_lossy(&o.stdout).trim_end().to_string(),
                    stderr: String::from_utf8_lossy(&o.stderr).trim_end().to_string(),
                }),
            Output::Inherit => c.status().await.map(|s| CommandOutput {
                code: s.code(),
                ..CommandOutput::default()
            }),
        };

        result.map_err(|source| ProcessError::Spawn {
            program: cmd.program.clone(),
            source,
        })
    }
}

/// Runs a delegated command whose failure does not stop the caller.
/// Returns whether it exited with status 0.
pub async fn run_unchecked(runner: &dyn CommandRunner, cmd: &CommandSpec) -> bool {
    match runner.run(cmd).await {
        Ok(out) if out.success() => {
            debug!(command = %cmd, "command succeeded");
            true
        }
        Ok(out) => {
            warn!(command = %cmd, code = ?out.code, "command failed, continuing");
            false
        }
        Err(e) => {
            warn!(command = %cmd, error = %e, "command could not be started, continuing");
            false
        }
    }
}

/// How commands needing root are launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    Direct,
    Sudo,
}

impl Privilege {
    #[cfg(unix)]
    pub fn detect() -> Self {
        if nix::unistd::geteuid().is_root() {
            Privilege::Direct
        } else {
            Privilege::Sudo
        }
    }

    #[cfg(not(unix))]
    pub fn detect() -> Self {
        Privilege::Direct
    }

    pub fn wrap(self, cmd: CommandSpec) -> CommandSpec {
        match self {
            Privilege::Direct => cmd,
            Privilege::Sudo => {
                let CommandSpec {
                    program,
                    args,
                    cwd,
                    output,
                } = cmd;
                CommandSpec {
                    program: "sudo".to_string(),
                    args: std::iter::once(program).chain(args).collect(),
                    cwd,
                    output,
                }
            }
        }
    }
}
