use crate::config::Config;
use crate::process::{run_unchecked, CommandRunner, CommandSpec};
use crate::term;
use std::path::Path;
use tracing::debug;

/// Which of the two tools answered their version query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preflight {
    pub runtime: bool,
    pub compose: bool,
}

impl Preflight {
    pub async fn detect(runner: &dyn CommandRunner, cfg: &Config) -> Self {
        let runtime = is_runtime_present(runner, cfg).await;
        let compose = is_compose_present(runner, cfg).await;
        Preflight { runtime, compose }
    }
}

pub async fn is_runtime_present(runner: &dyn CommandRunner, cfg: &Config) -> bool {
    report("Docker", answers_version(runner, &cfg.docker_bin).await)
}

pub async fn is_compose_present(runner: &dyn CommandRunner, cfg: &Config) -> bool {
    report("Docker Compose", answers_version(runner, &cfg.compose_bin).await)
}

fn report(tool: &str, present: bool) -> bool {
    if present {
        term::success(&format!("{tool} is already installed."));
    } else {
        term::warning(&format!("{tool} is not installed."));
    }
    present
}

/// Exit status decides; the version text is never inspected.
async fn answers_version(runner: &dyn CommandRunner, bin: &str) -> bool {
    match runner.run(&CommandSpec::new(bin).arg("--version").captured()).await {
        Ok(out) => {
            debug!(
                bin,
                code = ?out.code,
                stdout = %out.stdout,
                stderr = %out.stderr,
                "version query"
            );
            out.success()
        }
        Err(e) => {
            debug!(bin, error = %e, "version query could not run");
            false
        }
    }
}

/// `docker-compose <args>` against the descriptor in `site_dir`.
pub async fn compose(
    runner: &dyn CommandRunner,
    cfg: &Config,
    site_dir: &Path,
    args: &[&str],
) -> bool {
    let cmd = CommandSpec::new(&cfg.compose_bin)
        .args(args.iter().copied())
        .current_dir(site_dir);
    run_unchecked(runner, &cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Output;
    use crate::testing::{config, FakeRunner};

    #[tokio::test]
    async fn zero_exit_means_present_whatever_stdout_says() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let runner = FakeRunner::new().respond("docker --version", 0, "command not found");
        assert!(is_runtime_present(&runner, &cfg).await);

        let calls = runner.calls();
        assert_eq!(calls[0].output, Output::Capture);
    }

    #[tokio::test]
    async fn non_zero_exit_means_absent_whatever_stdout_says() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let runner = FakeRunner::new().respond(
            "docker-compose --version",
            1,
            "Docker Compose version v2.27.0",
        );
        assert!(!is_compose_present(&runner, &cfg).await);
    }

    #[tokio::test]
    async fn unlaunchable_tool_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let runner = FakeRunner::new().missing("docker").missing("docker-compose");
        let found = Preflight::detect(&runner, &cfg).await;
        assert_eq!(
            found,
            Preflight {
                runtime: false,
                compose: false
            }
        );
        assert_eq!(
            runner.lines(),
            vec!["docker --version", "docker-compose --version"]
        );
    }

    #[tokio::test]
    async fn compose_runs_in_site_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let runner = FakeRunner::new().failing("docker-compose up -d");
        let site_dir = dir.path().join("blog");

        assert!(!compose(&runner, &cfg, &site_dir, &["up", "-d"]).await);
        let calls = runner.calls();
        assert_eq!(calls[0].cwd.as_deref(), Some(site_dir.as_path()));
        assert_eq!(calls[0].output, Output::Inherit);
    }
}
