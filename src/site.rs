use crate::compose::{self, ComposeFile};
use crate::config::Config;
use crate::docker;
use crate::process::CommandRunner;
use crate::term::{self, Prompt};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A WordPress site: a directory named after the site under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    name: String,
    dir: PathBuf,
}

impl Site {
    pub fn new(root: &Path, name: &str) -> Self {
        Site {
            name: name.to_string(),
            dir: root.join(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn compose_file(&self) -> PathBuf {
        self.dir.join(compose::FILE_NAME)
    }

    pub fn content_dir(&self) -> PathBuf {
        self.dir.join(compose::CONTENT_DIR)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.name, compose::WEB_PORT)
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Whether the directory is a strict child of the root it was created
    /// under: not empty, `.`, `..`, absolute or climbing out.
    pub fn is_contained(&self) -> bool {
        let mut components = Path::new(&self.name).components().peekable();
        components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
    }

    fn ensure_exists(&self) -> bool {
        if !self.exists() {
            term::warning(&format!(
                "Site '{}' does not exist at {}.",
                self.name,
                self.dir.display()
            ));
            return false;
        }
        true
    }
}

/// Lay out the directory, descriptor and content folder. Existing ones are reused.
pub fn scaffold(site: &Site) -> Result<()> {
    fs::create_dir_all(site.dir())
        .with_context(|| format!("creating {}", site.dir().display()))?;

    let yaml = ComposeFile::wordpress().to_yaml()?;
    fs::write(site.compose_file(), yaml)
        .with_context(|| format!("writing {}", site.compose_file().display()))?;

    fs::create_dir_all(site.content_dir())
        .with_context(|| format!("creating {}", site.content_dir().display()))?;
    Ok(())
}

pub async fn create(runner: &dyn CommandRunner, cfg: &Config, site: &Site) -> Result<()> {
    term::info(&format!("Creating WordPress site '{}'...", site.name()));
    scaffold(site)?;
    docker::compose(runner, cfg, site.dir(), &["up", "-d"]).await;
    term::success(&format!(
        "WordPress site '{}' created successfully.",
        site.name()
    ));
    Ok(())
}

pub async fn enable(runner: &dyn CommandRunner, cfg: &Config, site: &Site) {
    if !site.ensure_exists() {
        return;
    }
    docker::compose(runner, cfg, site.dir(), &["start"]).await;
    term::success("Site enabled.");
}

pub async fn disable(runner: &dyn CommandRunner, cfg: &Config, site: &Site) {
    if !site.ensure_exists() {
        return;
    }
    docker::compose(runner, cfg, site.dir(), &["stop"]).await;
    term::success("Site disabled.");
}

/// Tear the stack down and remove the directory after confirmation.
/// Returns whether anything was deleted.
pub async fn delete(
    runner: &dyn CommandRunner,
    cfg: &Config,
    site: &Site,
    prompt: &dyn Prompt,
) -> Result<bool> {
    let question = format!(
        "Are you sure you want to delete the site '{}'? (Y/N): ",
        site.name()
    );
    if !term::confirm(prompt, &question) {
        return Ok(false);
    }
    if !site.is_contained() {
        term::warning(&format!(
            "Refusing to delete {}: '{}' does not name a directory below {}.",
            site.dir().display(),
            site.name(),
            cfg.root.display()
        ));
        return Ok(false);
    }
    if !site.ensure_exists() {
        return Ok(false);
    }

    docker::compose(runner, cfg, site.dir(), &["down"]).await;
    fs::remove_dir_all(site.dir())
        .with_context(|| format!("removing {}", site.dir().display()))?;
    term::success(&format!("Site '{}' deleted successfully.", site.name()));
    Ok(true)
}
