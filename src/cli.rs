use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use thiserror::Error;

/// Provision and manage a local WordPress site on docker-compose.
#[derive(Parser, Debug)]
#[command(
    name = "wpsite",
    version,
    about = "Provision and manage a local WordPress site on docker-compose",
    long_about = "Creates <SITE>/docker-compose.yml with a MySQL and a WordPress service, \
                  brings it up on port 8000 and maps <SITE> to 127.0.0.1 in the hosts file. \
                  Installs docker and docker-compose first when they are missing.\n\n\
                  Examples:\n  \
                  wpsite blog create\n  \
                  wpsite blog disable\n  \
                  wpsite blog delete"
)]
pub struct Cli {
    /// Site name; used as directory name and hostname
    #[arg(value_name = "SITE")]
    pub site: Option<String>,

    #[arg(value_enum, value_name = "COMMAND")]
    pub action: Option<Action>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Scaffold the site, start it and register its hostname
    Create,
    /// Start the site's containers
    Enable,
    /// Stop the site's containers
    Disable,
    /// Remove the site's containers and directory
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub site: String,
    pub action: Action,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Please provide the site name as a command-line argument.")]
    MissingSite,
    #[error("Please provide a valid subcommand: create, enable, disable, or delete.")]
    InvalidAction,
    #[error("{0}")]
    Unrecognized(String),
}

#[derive(Debug)]
pub enum CliError {
    /// `--help` / `--version`; print and exit successfully.
    Info(clap::Error),
    Usage(UsageError),
}

impl Cli {
    pub fn into_invocation(self) -> Result<Invocation, UsageError> {
        let site = self.site.ok_or(UsageError::MissingSite)?;
        let action = self.action.ok_or(UsageError::InvalidAction)?;
        Ok(Invocation { site, action })
    }
}

pub fn parse_args<I, T>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            return Err(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => CliError::Info(e),
                ErrorKind::InvalidValue => CliError::Usage(UsageError::InvalidAction),
                _ => CliError::Usage(UsageError::Unrecognized(e.render().to_string())),
            });
        }
    };
    cli.into_invocation().map_err(CliError::Usage)
}
