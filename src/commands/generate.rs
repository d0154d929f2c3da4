//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::MarkdownRenderer;
use crate::generator::{BuildSummary, Generator};
use crate::report::TracingReporter;
use crate::{Site, CONFIG_FILE};

/// Run a full build of the site
pub fn run(site: &Site) -> Result<BuildSummary> {
    let start = Instant::now();

    let source = site.source();
    let markdown = MarkdownRenderer::with_options(&site.config.highlight);
    let reporter = TracingReporter;

    let summary = Generator::new(&source, &markdown, &reporter, &site.public_dir)
        .with_base_template(&site.config.base_template)
        .generate()?;

    tracing::info!(
        "Generated {} posts ({} failed), copied {} assets ({} failed) in {:.2}s",
        summary.posts_written,
        summary.posts_failed,
        summary.assets_copied,
        summary.assets_failed,
        start.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Watch the site sources and rebuild on every change
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    let source = site.source();
    for dir in source.watched_dirs() {
        if dir.exists() {
            watcher.watch(dir, notify::RecursiveMode::Recursive)?;
        }
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut debounce = Debounce::new(Duration::from_millis(500));

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => debounce.record(Instant::now()),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if debounce.take_ready(Instant::now()) {
            tracing::info!("File changed, regenerating...");
            if let Err(e) = rebuild(site) {
                tracing::error!("Generation failed: {:#}", e);
            }
        }
    }

    Ok(())
}

/// Collapses a burst of change events into one rebuild, fired once the
/// sources have been quiet for `quiet`
struct Debounce {
    quiet: Duration,
    last_change: Option<Instant>,
}

impl Debounce {
    fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_change: None,
        }
    }

    fn record(&mut self, at: Instant) {
        self.last_change = Some(at);
    }

    /// True once per burst, when a change is pending and old enough
    fn take_ready(&mut self, now: Instant) -> bool {
        match self.last_change {
            Some(at) if now.saturating_duration_since(at) >= self.quiet => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }
}

/// Reload the configuration, then build
fn rebuild(site: &Site) -> Result<BuildSummary> {
    let site = Site::new(&site.base_dir)?;
    run(&site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_on_site_directory() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("content/posts")).unwrap();
        fs::create_dir_all(base.join("templates")).unwrap();
        fs::create_dir_all(base.join("static/css")).unwrap();
        fs::write(
            base.join("templates/base.html"),
            "<main>{{content}}</main>{{blog_list}}",
        )
        .unwrap();
        fs::write(base.join("content/about.html"), "about").unwrap();
        fs::write(base.join("content/posts.html"), "posts").unwrap();
        fs::write(
            base.join("content/posts/hello.md"),
            "---\ntitle: Hello\ndate: 2024-06-01\n---\n\nHi *there*\n",
        )
        .unwrap();
        fs::write(base.join("content/posts/ignored.txt"), "not a post").unwrap();
        fs::write(base.join("static/css/site.css"), "body{}").unwrap();

        let site = Site::new(base).unwrap();
        let summary = run(&site).unwrap();

        assert_eq!(summary.posts_written, 1);
        assert_eq!(summary.assets_copied, 1);
        let post = fs::read_to_string(base.join("dist/posts/hello/index.html")).unwrap();
        assert!(post.contains("<em>there</em>"));
        assert!(!base.join("dist/posts/ignored").exists());
        assert!(base.join("dist/static/css/site.css").exists());
    }

    #[test]
    fn test_run_respects_config() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("layout")).unwrap();
        fs::write(
            base.join(CONFIG_FILE),
            "templates_dir: layout\nbase_template: page.html\npublic_dir: public\n",
        )
        .unwrap();
        fs::write(base.join("layout/page.html"), "[{{content}}]").unwrap();

        let site = Site::new(base).unwrap();
        run(&site).unwrap();

        assert_eq!(fs::read_to_string(base.join("public/about.html")).unwrap(), "[]");
    }

    #[test]
    fn test_run_without_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let err = run(&site).unwrap_err();
        assert!(err.to_string().contains("template not found: base.html"));
    }

    #[test]
    fn test_debounce_delays_instead_of_dropping() {
        let start = Instant::now();
        let quiet = Duration::from_millis(500);
        let mut debounce = Debounce::new(quiet);
        assert!(!debounce.take_ready(start));

        debounce.record(start);
        assert!(!debounce.take_ready(start + Duration::from_millis(100)));
        assert!(debounce.take_ready(start + quiet));
        assert!(!debounce.take_ready(start + quiet * 2));

        // A save right after a rebuild still produces a rebuild later
        let late = start + quiet + Duration::from_millis(10);
        debounce.record(late);
        assert!(!debounce.take_ready(late + Duration::from_millis(50)));
        assert!(debounce.take_ready(late + quiet));
    }

    #[test]
    fn test_debounce_waits_for_the_last_change() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(500));

        debounce.record(start);
        debounce.record(start + Duration::from_millis(400));
        assert!(!debounce.take_ready(start + Duration::from_millis(600)));
        assert!(debounce.take_ready(start + Duration::from_millis(900)));
    }
}
