//! Installs missing tooling from upstream. Nothing downloaded here is verified
//! against a checksum.

use crate::config::Config;
use crate::process::{run_unchecked, CommandRunner, CommandSpec};
use crate::term;

/// Host OS and CPU family in docker/compose release-asset naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    #[cfg(unix)]
    pub fn detect() -> Self {
        match nix::sys::utsname::uname() {
            Ok(uts) => Self::from_uname(
                &uts.sysname().to_string_lossy(),
                &uts.machine().to_string_lossy(),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "uname failed, using build target");
                Self::from_uname(std::env::consts::OS, std::env::consts::ARCH)
            }
        }
    }

    #[cfg(not(unix))]
    pub fn detect() -> Self {
        Self::from_uname(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn from_uname(sysname: &str, machine: &str) -> Self {
        let os = match sysname.to_ascii_lowercase().as_str() {
            "macos" => "darwin".to_string(),
            other => other.to_string(),
        };
        let arch = match machine.to_ascii_lowercase().as_str() {
            "amd64" | "x64" => "x86_64".to_string(),
            "arm64" => "aarch64".to_string(),
            "armv7l" => "armv7".to_string(),
            "armv6l" => "armv6".to_string(),
            other => other.to_string(),
        };
        Platform { os, arch }
    }
}

pub fn compose_release_url(base: &str, platform: &Platform) -> String {
    format!("{base}/docker-compose-{}-{}", platform.os, platform.arch)
}

/// Downloads the vendor script into a private directory and runs it elevated.
/// The script only runs if the download succeeded.
pub async fn install_runtime(runner: &dyn CommandRunner, cfg: &Config) {
    term::info("Installing Docker...");

    // Owned by us with mode 0700, removed on drop.
    let workdir = match tempfile::Builder::new().prefix("wpsite-").tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(error = %e, "cannot create a private download directory");
            term::warning("Docker installation skipped.");
            return;
        }
    };
    let script = workdir
        .path()
        .join("get-docker.sh")
        .to_string_lossy()
        .into_owned();

    let downloaded = run_unchecked(
        runner,
        &CommandSpec::new("curl").args([
            "-fsSL",
            cfg.docker_install_url.as_str(),
            "-o",
            script.as_str(),
        ]),
    )
    .await;
    if !downloaded {
        term::warning("Docker installation skipped: the install script could not be downloaded.");
        return;
    }

    run_unchecked(
        runner,
        &cfg.privilege.wrap(CommandSpec::new("sh").arg(script.as_str())),
    )
    .await;

    term::success("Docker installation completed.");
}

pub async fn install_compose(runner: &dyn CommandRunner, cfg: &Config) {
    term::info("Installing Docker Compose...");
    let url = compose_release_url(&cfg.compose_release_url, &cfg.platform);
    let target = cfg.compose_install_path.to_string_lossy().into_owned();

    run_unchecked(
        runner,
        &cfg.privilege.wrap(CommandSpec::new("curl").args([
            "-fsSL",
            "-o",
            target.as_str(),
            url.as_str(),
        ])),
    )
    .await;
    run_unchecked(
        runner,
        &cfg.privilege
            .wrap(CommandSpec::new("chmod").args(["+x", target.as_str()])),
    )
    .await;

    term::success("Docker Compose installation completed.");
}
