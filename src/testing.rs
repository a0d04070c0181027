//! Test doubles for the host-facing seams.

use crate::config::Config;
use crate::hosts::HostsFile;
use crate::install::Platform;
use crate::process::{CommandOutput, CommandRunner, CommandSpec, Privilege, ProcessError};
use crate::term::{Browser, Prompt};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records every command and answers from a script. Unscripted commands exit 0.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<CommandSpec>>,
    responses: HashMap<String, CommandOutput>,
    failing_prefixes: Vec<String>,
    missing: HashSet<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` fail to spawn, as if it were not on PATH.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    pub fn failing(self, line: &str) -> Self {
        self.respond(line, 1, "")
    }

    /// Exit 1 for any command line starting with `prefix`.
    pub fn failing_prefix(mut self, prefix: &str) -> Self {
        self.failing_prefixes.push(prefix.to_string());
        self
    }

    pub fn respond(mut self, line: &str, code: i32, stdout: &str) -> Self {
        self.responses.insert(
            line.to_string(),
            CommandOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        self.calls.lock().unwrap().push(cmd.clone());
        let line = cmd.to_string();
        if let Some(out) = self.responses.get(&line) {
            return Ok(out.clone());
        }
        if self.failing_prefixes.iter().any(|p| line.starts_with(p.as_str())) {
            return Ok(CommandOutput {
                code: Some(1),
                ..CommandOutput::default()
            });
        }
        if self.missing.contains(&cmd.program) {
            return Err(ProcessError::Spawn {
                program: cmd.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            });
        }
        Ok(CommandOutput {
            code: Some(0),
            ..CommandOutput::default()
        })
    }
}

/// Replays canned answers in order; runs dry as an empty answer.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str) -> io::Result<String> {
        self.asked.lock().unwrap().push(question.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeBrowser {
    fail: bool,
    opened: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Browser for FakeBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
        } else {
            Ok(())
        }
    }
}

/// Hosts file the process may not write to.
#[derive(Default)]
pub struct DeniedHosts {
    attempts: Mutex<usize>,
}

impl DeniedHosts {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl HostsFile for DeniedHosts {
    fn append(&self, _line: &str) -> io::Result<()> {
        *self.attempts.lock().unwrap() += 1;
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }

    fn location(&self) -> &Path {
        Path::new("/etc/hosts")
    }
}

/// Config rooted in a scratch directory with a private hosts file.
pub fn config(root: &Path) -> Config {
    Config {
        root: root.to_path_buf(),
        docker_bin: "docker".to_string(),
        compose_bin: "docker-compose".to_string(),
        hosts_file: root.join("hosts"),
        docker_install_url: "https://get.docker.com".to_string(),
        compose_release_url: "https://github.com/docker/compose/releases/latest/download"
            .to_string(),
        compose_install_path: PathBuf::from("/usr/local/bin/docker-compose"),
        privilege: Privilege::Sudo,
        platform: Platform::from_uname("Linux", "x86_64"),
    }
}
