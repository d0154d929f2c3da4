//! Generator module - assembles the site into the output directory
//!
//! A build runs five phases in a fixed order, each one finishing before the
//! next starts:
//!
//! 1. clean: remove the previous output tree, deepest paths first
//! 2. create: make the empty output directory
//! 3. static pages: `about.html` and `posts.html` (with the post listing)
//! 4. post pages: `posts/<slug>/index.html` for every post
//! 5. static assets: copy the static tree to `static/`
//!
//! Phases 1 and 2, loading the base template, and writing the two static
//! pages are fatal on failure. A post or asset that fails is reported and
//! skipped.

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

use crate::content::{
    sort_newest_first, ContentSource, ListingEntry, MarkdownEngine, Metadata, Post,
};
use crate::error::BuildError;
use crate::helpers::fs::{copy_tree, remove_tree, write_file};
use crate::helpers::{blog_list, relocate_static_refs, LISTING_ERROR};
use crate::report::Reporter;
use crate::templates::Template;

/// Named content source and output file of the home page
pub const ABOUT_PAGE: &str = "about.html";
/// Named content source and output file of the post index page
pub const POSTS_PAGE: &str = "posts.html";
/// Output subdirectory holding one directory per post
pub const POSTS_OUTPUT_DIR: &str = "posts";
/// Output subdirectory receiving the static assets
pub const STATIC_OUTPUT_DIR: &str = "static";
/// Default base template name
pub const BASE_TEMPLATE: &str = "base.html";

/// How many directories below the output root a post page sits
const POST_PAGE_DEPTH: usize = 2;

/// Counts of what a build produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub posts_written: usize,
    pub posts_failed: usize,
    pub assets_copied: usize,
    pub assets_failed: usize,
}

/// Which navigation entry a page highlights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Home,
    Posts,
}

/// Static site generator
pub struct Generator<'a, M: MarkdownEngine> {
    source: &'a dyn ContentSource,
    markdown: &'a M,
    reporter: &'a dyn Reporter,
    public_dir: PathBuf,
    base_template: String,
}

impl<'a, M: MarkdownEngine> Generator<'a, M> {
    /// Create a new generator writing to `public_dir`
    pub fn new<P: Into<PathBuf>>(
        source: &'a dyn ContentSource,
        markdown: &'a M,
        reporter: &'a dyn Reporter,
        public_dir: P,
    ) -> Self {
        Self {
            source,
            markdown,
            reporter,
            public_dir: public_dir.into(),
            base_template: BASE_TEMPLATE.to_string(),
        }
    }

    /// Use a base template other than `base.html`
    pub fn with_base_template(mut self, name: &str) -> Self {
        self.base_template = name.to_string();
        self
    }

    /// Output directory
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<BuildSummary, BuildError> {
        // Loaded before cleaning so a missing template leaves the last good
        // output in place
        let template = self.load_template()?;

        self.clean()?;
        self.create()?;

        self.generate_static_pages(&template)?;

        let mut summary = BuildSummary::default();
        self.generate_post_pages(&template, &mut summary);
        self.copy_static_assets(&mut summary);

        self.reporter.info(&format!(
            "Site generated successfully in: {}",
            self.public_dir.display()
        ));
        Ok(summary)
    }

    fn load_template(&self) -> Result<Template, BuildError> {
        self.source
            .read_template(&self.base_template)
            .map(Template::new)
            .map_err(|source| BuildError::Template {
                name: self.base_template.clone(),
                source,
            })
    }

    /// Phase 1: remove any previous output
    fn clean(&self) -> Result<(), BuildError> {
        match remove_tree(&self.public_dir) {
            Ok(true) => {
                self.reporter.info(&format!(
                    "Cleared existing output directory: {}",
                    self.public_dir.display()
                ));
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => Err(BuildError::Clean {
                path: e.path,
                source: e.source,
            }),
        }
    }

    /// Phase 2: create the empty output directory
    fn create(&self) -> Result<(), BuildError> {
        std::fs::create_dir_all(&self.public_dir).map_err(|source| BuildError::Create {
            path: self.public_dir.clone(),
            source,
        })
    }

    /// Phase 3: home page and post index page
    fn generate_static_pages(&self, template: &Template) -> Result<(), BuildError> {
        let about = page_values(Nav::Home, self.read_content(ABOUT_PAGE), None);
        self.write_static_page(ABOUT_PAGE, &render_page(template, &about))?;

        let posts = page_values(
            Nav::Posts,
            self.read_content(POSTS_PAGE),
            Some(self.generate_blog_list()),
        );
        self.write_static_page(POSTS_PAGE, &render_page(template, &posts))?;

        Ok(())
    }

    fn write_static_page(&self, name: &str, html: &str) -> Result<(), BuildError> {
        let path = self.public_dir.join(name);
        write_file(&path, html).map_err(|source| BuildError::Write { path, source })?;
        self.reporter.info(&format!("Generated: {}", name));
        Ok(())
    }

    /// Named page body, or empty content with a warning when it is missing
    fn read_content(&self, name: &str) -> String {
        match self.source.read_named(name) {
            Ok(content) => content,
            Err(e) => {
                self.reporter.warn(&format!(
                    "Content file not found: {}, using empty content ({})",
                    name, e
                ));
                String::new()
            }
        }
    }

    fn generate_blog_list(&self) -> String {
        match collect_listing(self.source, self.reporter) {
            Ok(entries) => blog_list(&entries),
            Err(e) => {
                self.reporter.error(&format!("Error loading blog posts: {}", e));
                LISTING_ERROR.to_string()
            }
        }
    }

    /// Phase 4: one page per post
    fn generate_post_pages(&self, template: &Template, summary: &mut BuildSummary) {
        let names = match self.source.post_names() {
            Ok(names) => names,
            Err(e) => {
                self.reporter.error(&format!("Error generating blog posts: {}", e));
                return;
            }
        };

        for name in names {
            match self.generate_post(template, &name) {
                Ok(slug) => {
                    summary.posts_written += 1;
                    self.reporter.info(&format!("Generated: {}/{}", POSTS_OUTPUT_DIR, slug));
                }
                Err(e) => {
                    summary.posts_failed += 1;
                    self.reporter.error(&format!("Failed to generate post {}: {:#}", name, e));
                }
            }
        }
    }

    /// Render and write a single post, returning its slug
    fn generate_post(&self, template: &Template, name: &str) -> Result<String> {
        let raw = self
            .source
            .read_post(name)
            .with_context(|| format!("Failed to read {}", name))?;
        let post = Post::parse(name, self.source.post_extension(), &raw);

        let tree = self
            .markdown
            .parse(&post.content)
            .context("Failed to parse markdown")?;
        let body = self
            .markdown
            .render(tree)
            .context("Failed to render markdown")?;

        let values = page_values(Nav::Posts, body, Some(String::new()));
        let html = relocate_static_refs(
            &render_page(template, &values),
            STATIC_OUTPUT_DIR,
            POST_PAGE_DEPTH,
        );

        let dir = self.public_dir.join(POSTS_OUTPUT_DIR).join(&post.slug);
        let path = dir.join("index.html");
        if let Err(e) = write_file(&path, &html) {
            // Leave nothing behind for a post that was not written
            if let Err(cleanup) = remove_tree(&dir) {
                self.reporter.warn(&format!(
                    "Failed to remove {}: {}",
                    cleanup.path.display(),
                    cleanup.source
                ));
            }
            return Err(e).with_context(|| format!("Failed to write {}", path.display()));
        }

        Ok(post.slug)
    }

    /// Phase 5: copy the static asset tree
    fn copy_static_assets(&self, summary: &mut BuildSummary) {
        let root = match self.source.static_root() {
            Some(root) => root,
            None => {
                self.reporter.warn("Static resource directory not found");
                return;
            }
        };

        let target = self.public_dir.join(STATIC_OUTPUT_DIR);
        let outcome = match copy_tree(&root, &target) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.reporter.error(&format!("Error copying static assets: {}", e));
                return;
            }
        };

        for relative in &outcome.copied {
            self.reporter.info(&format!("Copied: {}", relative.display()));
        }
        for failure in &outcome.failed {
            self.reporter.error(&format!(
                "Failed to copy: {} - {}",
                failure.path.display(),
                failure.source
            ));
        }

        summary.assets_copied = outcome.copied.len();
        summary.assets_failed = outcome.failed.len();
    }
}

/// Read the front matter of every post and order the entries newest first.
///
/// A post that cannot be read is reported and left out. Failing to enumerate
/// the posts at all is returned to the caller.
pub fn collect_listing(
    source: &dyn ContentSource,
    reporter: &dyn Reporter,
) -> io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    for name in source.post_names()? {
        match source.read_post(&name) {
            Ok(raw) => entries.push(ListingEntry::from_source(
                &name,
                source.post_extension(),
                &raw,
            )),
            Err(e) => reporter.warn(&format!("Skipping {} in listing: {}", name, e)),
        }
    }

    sort_newest_first(&mut entries);
    Ok(entries)
}

/// Placeholder values shared by every page. Insertion order matters:
/// `content` comes before `blog_list` so a listing placeholder inside a page
/// body is filled in as well. Without a `blog_list` value the placeholder is
/// left in the page untouched.
fn page_values(nav: Nav, content: String, blog_list: Option<String>) -> Metadata {
    let (home, posts) = match nav {
        Nav::Home => ("active", ""),
        Nav::Posts => ("", "active"),
    };

    let mut values = Metadata::new();
    values.insert("activeHome".to_string(), home.to_string());
    values.insert("activePosts".to_string(), posts.to_string());
    values.insert("content".to_string(), content);
    if let Some(blog_list) = blog_list {
        values.insert("blog_list".to_string(), blog_list);
    }
    values
}

fn render_page(template: &Template, values: &Metadata) -> String {
    let unresolved: Vec<&str> = template
        .placeholders()
        .into_iter()
        .filter(|name| !values.contains_key(*name))
        .collect();
    if !unresolved.is_empty() {
        tracing::debug!("Placeholders left unresolved: {}", unresolved.join(", "));
    }

    template.render(values)
}
