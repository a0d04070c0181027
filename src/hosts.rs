use crate::term;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    PermissionDenied,
}

pub fn mapping_line(name: &str) -> String {
    format!("127.0.0.1 {name}\n")
}

/// The resolver file host mappings are appended to.
pub trait HostsFile {
    fn append(&self, line: &str) -> io::Result<()>;
    fn location(&self) -> &Path;
}

#[derive(Debug, Clone)]
pub struct SystemHosts {
    path: PathBuf,
}

impl SystemHosts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SystemHosts { path: path.into() }
    }
}

impl HostsFile for SystemHosts {
    fn append(&self, line: &str) -> io::Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| f.write_all(line.as_bytes()))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Appends a loopback mapping for `name`. Existing entries are not checked, so
/// repeated calls add duplicate lines. A permission failure is reported and
/// swallowed; other I/O errors propagate.
pub fn register(hosts: &dyn HostsFile, name: &str) -> io::Result<Registration> {
    match hosts.append(&mapping_line(name)) {
        Ok(()) => {
            term::success(&format!(
                "Added {} entry for '{name}'.",
                hosts.location().display()
            ));
            Ok(Registration::Added)
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            tracing::debug!(
                path = %hosts.location().display(),
                error = %e,
                "hosts file not writable"
            );
            term::warning("Permission denied. Please run the script as root or with sudo.");
            Ok(Registration::PermissionDenied)
        }
        Err(e) => Err(e),
    }
}
