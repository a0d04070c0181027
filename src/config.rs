use crate::install::Platform;
use crate::process::Privilege;
use std::path::PathBuf;

pub const DEFAULT_DOCKER_BIN: &str = "docker";
pub const DEFAULT_COMPOSE_BIN: &str = "docker-compose";
pub const DEFAULT_HOSTS_FILE: &str = "/etc/hosts";
pub const DEFAULT_DOCKER_INSTALL_URL: &str = "https://get.docker.com";
pub const DEFAULT_COMPOSE_RELEASE_URL: &str =
    "https://github.com/docker/compose/releases/latest/download";
pub const DEFAULT_COMPOSE_INSTALL_PATH: &str = "/usr/local/bin/docker-compose";

/// Runtime settings. Only `DOCKER_BIN`, `DOCKER_COMPOSE_BIN` and `HOSTS_FILE`
/// are read from the process environment; no file is consulted.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory sites are created under (the launch directory).
    pub root: PathBuf,
    pub docker_bin: String,
    pub compose_bin: String,
    pub hosts_file: PathBuf,

    pub docker_install_url: String,
    pub compose_release_url: String,
    pub compose_install_path: PathBuf,

    pub privilege: Privilege,
    pub platform: Platform,
}

impl Config {
    pub fn from_env(root: PathBuf) -> Self {
        Self::from_lookup(root, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(root: PathBuf, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Config {
            root,
            docker_bin: get("DOCKER_BIN", DEFAULT_DOCKER_BIN),
            compose_bin: get("DOCKER_COMPOSE_BIN", DEFAULT_COMPOSE_BIN),
            hosts_file: PathBuf::from(get("HOSTS_FILE", DEFAULT_HOSTS_FILE)),
            // Used by commands run under sudo; never taken from the environment.
            docker_install_url: DEFAULT_DOCKER_INSTALL_URL.to_string(),
            compose_release_url: DEFAULT_COMPOSE_RELEASE_URL.to_string(),
            compose_install_path: PathBuf::from(DEFAULT_COMPOSE_INSTALL_PATH),
            privilege: Privilege::detect(),
            platform: Platform::detect(),
        }
    }
}
