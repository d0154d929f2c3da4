//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Every path is relative to the site directory. A missing `_config.yml`, or
/// a missing key inside it, falls back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,

    // Directory
    pub content_dir: String,
    /// Posts directory, inside `content_dir`
    pub posts_dir: String,
    pub templates_dir: String,
    pub base_template: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    /// Extension (without the dot) a post file must end in
    pub post_extension: String,
    pub new_post_name: String,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            templates_dir: "templates".to_string(),
            base_template: "base.html".to_string(),
            static_dir: "static".to_string(),
            public_dir: "dist".to_string(),

            post_extension: "md".to_string(),
            new_post_name: ":title.md".to_string(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Name of a syntect default theme
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.public_dir, "dist");
        assert_eq!(config.post_extension, "md");
        assert_eq!(config.base_template, "base.html");
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
public_dir: public
highlight:
  line_number: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.content_dir, "content");
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "static_dir: assets\npost_extension: markdown\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.static_dir, "assets");
        assert_eq!(config.post_extension, "markdown");
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "highlight: [not, a, map]\n").unwrap();

        assert!(SiteConfig::load(&path).is_err());
    }
}
