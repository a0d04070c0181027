mod app;
mod cli;
mod compose;
mod config;
mod docker;
mod hosts;
mod install;
mod process;
mod site;
mod term;
#[cfg(test)]
mod testing;

use anyhow::Result;
use cli::{CliError, Invocation};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    // Arguments are checked before anything touches the host.
    let invocation = match cli::parse_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(CliError::Info(e)) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(CliError::Usage(e)) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };
    debug!(?invocation, "parsed arguments");

    match run(invocation).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(invocation: Invocation) -> Result<()> {
    let root = std::env::current_dir()?;
    let cfg = config::Config::from_env(root);
    debug!(?cfg, "configuration");

    let app = app::App {
        cfg: &cfg,
        runner: &process::SystemRunner,
        prompt: &term::StdinPrompt,
        browser: &term::SystemBrowser,
        hosts: &hosts::SystemHosts::new(&cfg.hosts_file),
    };
    app.run(&invocation).await
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("WPSITE_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
        EnvFilter::new(format!("wpsite={level}"))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
