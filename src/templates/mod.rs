//! Placeholder templates
//!
//! A template is plain text with `{{name}}` placeholders. There are no
//! conditionals, loops or includes: rendering is literal substring
//! replacement, and a placeholder with no value is left in the output as is.

use std::fs;
use std::io;
use std::path::Path;

use crate::content::Metadata;

/// An immutable template string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    /// Create a template from a string
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load a template from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// The raw template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute `values` into the template.
    ///
    /// Keys are applied one at a time in the map's insertion order, each one
    /// replacing every `{{key}}` in the text produced so far. A key never sees
    /// its own replacements again, but later keys do scan text inserted by
    /// earlier ones: with `content` before `blog_list`, a `{{blog_list}}`
    /// inside the inserted content gets filled in too.
    ///
    /// NOTE for product owners: that same rule means a value which happens to
    /// contain another key's placeholder syntax is rewritten, and the result
    /// depends on key order. Scanning all placeholders in one pass over the
    /// original template would remove the hazard but also the
    /// content-then-list behaviour above. Kept as is until that is decided.
    pub fn render(&self, values: &Metadata) -> String {
        let mut result = self.source.clone();
        for (key, value) in values {
            let placeholder = format!("{{{{{}}}}}", key);
            if result.contains(&placeholder) {
                result = result.replace(&placeholder, value);
            }
        }
        result
    }

    /// Names of the `{{name}}` placeholders in the template, in order of first
    /// appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let name = &after[..end];
                    if !name.is_empty() && !name.contains("{{") && !names.contains(&name) {
                        names.push(name);
                    }
                    rest = &after[end + 2..];
                }
                None => break,
            }
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_replaces_all_placeholders() {
        let template = Template::new("<p>{{a}} and {{b}}</p>");
        let html = template.render(&values(&[("a", "X"), ("b", "Y")]));
        assert_eq!(html, "<p>X and Y</p>");
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = Template::new("{{a}}-{{a}}-{{a}}");
        assert_eq!(template.render(&values(&[("a", "x")])), "x-x-x");
    }

    #[test]
    fn test_missing_value_left_verbatim() {
        let template = Template::new("<p>{{a}} and {{b}}</p>");
        let html = template.render(&values(&[("a", "X")]));
        assert_eq!(html, "<p>X and {{b}}</p>");
    }

    #[test]
    fn test_unused_values_are_ignored() {
        let template = Template::new("static text");
        assert_eq!(
            template.render(&values(&[("a", "X"), ("b", "Y")])),
            "static text"
        );
    }

    #[test]
    fn test_values_are_not_patterns() {
        let template = Template::new("{{price}}");
        assert_eq!(template.render(&values(&[("price", "$1 \\d+ $0")])), "$1 \\d+ $0");
    }

    #[test]
    fn test_key_does_not_rescan_its_own_value() {
        let template = Template::new("{{a}}");
        assert_eq!(template.render(&values(&[("a", "{{a}}!")])), "{{a}}!");
    }

    #[test]
    fn test_later_key_sees_earlier_insertion() {
        let template = Template::new("<main>{{content}}</main>");
        let html = template.render(&values(&[
            ("content", "<h1>Posts</h1>{{blog_list}}"),
            ("blog_list", "<ul></ul>"),
        ]));
        assert_eq!(html, "<main><h1>Posts</h1><ul></ul></main>");
    }

    #[test]
    fn test_earlier_key_misses_later_insertion() {
        let template = Template::new("<main>{{content}}</main>");
        let html = template.render(&values(&[
            ("blog_list", "<ul></ul>"),
            ("content", "<h1>Posts</h1>{{blog_list}}"),
        ]));
        assert_eq!(html, "<main><h1>Posts</h1>{{blog_list}}</main>");
    }

    #[test]
    fn test_placeholders() {
        let template = Template::new("{{a}} {{ b }} {{a}} {{}} {{c");
        assert_eq!(template.placeholders(), vec!["a", " b "]);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.html");
        fs::write(&path, "<title>{{title}}</title>").unwrap();

        let template = Template::from_file(&path).unwrap();
        assert_eq!(template.source(), "<title>{{title}}</title>");
        assert!(Template::from_file(dir.path().join("missing.html")).is_err());
    }
}
