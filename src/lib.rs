//! mdpress: a small static site generator
//!
//! Markdown posts with a front-matter header, a couple of named page bodies
//! and one HTML page shell with `{{placeholder}}` slots are assembled into a
//! ready-to-serve directory tree.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod report;
pub mod templates;

use anyhow::Result;
use std::path::{Component, Path, PathBuf};

pub use error::BuildError;
pub use generator::{BuildSummary, Generator};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A site directory and its configuration
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open the site in a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Open the site with an explicit configuration.
    ///
    /// Fails when the output directory would overlap the site itself, since
    /// every build deletes it first.
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        check_public_dir(&base_dir, &public_dir, &config)?;
        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Content source reading from this site's directories
    pub fn source(&self) -> content::FsSource {
        content::FsSource::new(&self.base_dir, &self.config)
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<BuildSummary> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<PathBuf> {
        commands::new::run(self, title)
    }
}

/// The output directory must not be the site directory, one of its
/// ancestors, or hold any of the source directories.
fn check_public_dir(base_dir: &Path, public_dir: &Path, config: &config::SiteConfig) -> Result<()> {
    let base = normalize(base_dir);
    let public = normalize(public_dir);

    if base.starts_with(&public) {
        anyhow::bail!(
            "public_dir {:?} would remove the site directory {:?} on every build",
            config.public_dir,
            base_dir
        );
    }

    let sources = [
        ("content_dir", &config.content_dir),
        ("templates_dir", &config.templates_dir),
        ("static_dir", &config.static_dir),
    ];
    for (field, dir) in sources {
        if normalize(&base_dir.join(dir)).starts_with(&public) {
            anyhow::bail!(
                "public_dir {:?} overlaps {} {:?}, which would be removed on every build",
                config.public_dir,
                field,
                dir
            );
        }
    }

    Ok(())
}

/// Resolve `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
