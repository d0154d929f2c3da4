//! Content sources
//!
//! The generator never touches the source tree directly. It asks a
//! [`ContentSource`] for post names, post text, named page bodies, templates
//! and the static asset root, so builds can run against a site directory or
//! against in-memory fixtures.

use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::SiteConfig;

/// Provides everything a build reads
pub trait ContentSource {
    /// File names of eligible posts, sorted by name.
    /// A missing posts directory is an empty list, not an error.
    fn post_names(&self) -> io::Result<Vec<String>>;

    /// Raw text of one post
    fn read_post(&self, name: &str) -> io::Result<String>;

    /// Raw text of a named page body such as `about.html`
    fn read_named(&self, name: &str) -> io::Result<String>;

    /// Raw text of a template such as `base.html`
    fn read_template(&self, name: &str) -> io::Result<String>;

    /// Root of the static asset tree, if there is one
    fn static_root(&self) -> Option<PathBuf>;

    /// Extension (without the dot) that makes a file a post
    fn post_extension(&self) -> &str;
}

/// Reads content from a site directory laid out per [`SiteConfig`]
#[derive(Debug, Clone)]
pub struct FsSource {
    content_dir: PathBuf,
    posts_dir: PathBuf,
    templates_dir: PathBuf,
    static_dir: PathBuf,
    post_extension: String,
}

impl FsSource {
    /// Create a source rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P, config: &SiteConfig) -> Self {
        let base_dir = base_dir.as_ref();
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            posts_dir: content_dir.join(&config.posts_dir),
            content_dir,
            templates_dir: base_dir.join(&config.templates_dir),
            static_dir: base_dir.join(&config.static_dir),
            post_extension: config.post_extension.clone(),
        }
    }

    /// Directory the posts are read from
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Every directory whose contents affect a build
    pub fn watched_dirs(&self) -> Vec<&Path> {
        vec![&self.content_dir, &self.templates_dir, &self.static_dir]
    }

    fn is_post(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.post_extension)
            .unwrap_or(false)
    }
}

impl ContentSource for FsSource {
    fn post_names(&self) -> io::Result<Vec<String>> {
        if !self.posts_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() || !self.is_post(entry.path()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            } else {
                tracing::warn!("Skipping post with non UTF-8 name: {:?}", entry.path());
            }
        }

        Ok(names)
    }

    fn read_post(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.posts_dir.join(name))
    }

    fn read_named(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.content_dir.join(name))
    }

    fn read_template(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.templates_dir.join(name))
    }

    fn static_root(&self) -> Option<PathBuf> {
        self.static_dir.is_dir().then(|| self.static_dir.clone())
    }

    fn post_extension(&self) -> &str {
        &self.post_extension
    }
}

/// In-memory content, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    posts: IndexMap<String, String>,
    named: IndexMap<String, String>,
    templates: IndexMap<String, String>,
    static_root: Option<PathBuf>,
    post_extension: String,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            post_extension: "md".to_string(),
            ..Default::default()
        }
    }

    pub fn with_post(mut self, name: &str, raw: &str) -> Self {
        self.posts.insert(name.to_string(), raw.to_string());
        self
    }

    pub fn with_named(mut self, name: &str, raw: &str) -> Self {
        self.named.insert(name.to_string(), raw.to_string());
        self
    }

    pub fn with_template(mut self, name: &str, raw: &str) -> Self {
        self.templates.insert(name.to_string(), raw.to_string());
        self
    }

    pub fn with_static_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.static_root = Some(root.into());
        self
    }
}

fn not_found(kind: &str, name: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{} not found: {}", kind, name))
}

impl ContentSource for MemorySource {
    fn post_names(&self) -> io::Result<Vec<String>> {
        let suffix = format!(".{}", self.post_extension);
        let mut names: Vec<String> = self
            .posts
            .keys()
            .filter(|name| name.ends_with(&suffix))
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    fn read_post(&self, name: &str) -> io::Result<String> {
        self.posts
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("post", name))
    }

    fn read_named(&self, name: &str) -> io::Result<String> {
        self.named
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("content", name))
    }

    fn read_template(&self, name: &str) -> io::Result<String> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("template", name))
    }

    fn static_root(&self) -> Option<PathBuf> {
        self.static_root.clone()
    }

    fn post_extension(&self) -> &str {
        &self.post_extension
    }
}
