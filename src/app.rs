use crate::cli::{Action, Invocation};
use crate::config::Config;
use crate::docker::Preflight;
use crate::hosts::{self, HostsFile};
use crate::install;
use crate::process::CommandRunner;
use crate::site::{self, Site};
use crate::term::{self, Browser, Prompt};
use anyhow::Result;
use tracing::{debug, info};

/// Everything a run needs from the outside world.
pub struct App<'a> {
    pub cfg: &'a Config,
    pub runner: &'a dyn CommandRunner,
    pub prompt: &'a dyn Prompt,
    pub browser: &'a dyn Browser,
    pub hosts: &'a dyn HostsFile,
}

impl App<'_> {
    pub async fn run(&self, invocation: &Invocation) -> Result<()> {
        self.ensure_tooling().await;

        let site = Site::new(&self.cfg.root, &invocation.site);
        info!(
            site = site.name(),
            action = ?invocation.action,
            dir = %site.dir().display(),
            "dispatching"
        );

        match invocation.action {
            Action::Create => {
                site::create(self.runner, self.cfg, &site).await?;
                hosts::register(self.hosts, site.name())?;
                self.offer_browser(&site);
            }
            Action::Enable => site::enable(self.runner, self.cfg, &site).await,
            Action::Disable => site::disable(self.runner, self.cfg, &site).await,
            Action::Delete => {
                let deleted = site::delete(self.runner, self.cfg, &site, self.prompt).await?;
                debug!(deleted, "delete finished");
            }
        }
        Ok(())
    }

    /// Install docker and docker-compose if their version queries fail.
    async fn ensure_tooling(&self) {
        let found = Preflight::detect(self.runner, self.cfg).await;
        if !found.runtime {
            install::install_runtime(self.runner, self.cfg).await;
        }
        if !found.compose {
            install::install_compose(self.runner, self.cfg).await;
        }
    }

    fn offer_browser(&self, site: &Site) {
        if !term::confirm(
            self.prompt,
            "Do you want to open the site in a browser? (Y/N): ",
        ) {
            return;
        }
        let url = site.url();
        if let Err(e) = self.browser.open(&url) {
            debug!(url = %url, error = %e, "browser launch failed");
            term::warning(&format!("Failed to open '{url}' in a browser."));
        }
    }
}
