//! Post model

use super::frontmatter::{self, Metadata};

/// Shown in listings for posts without a `date`
pub const UNKNOWN_DATE: &str = "Unknown date";

/// A markdown post read from the posts directory
#[derive(Debug, Clone)]
pub struct Post {
    /// Source file name, e.g. `hello-world.md`
    pub file_name: String,

    /// File name without the post extension, used for the output path and links
    pub slug: String,

    /// Front-matter key/value pairs
    pub metadata: Metadata,

    /// Markdown with the front matter removed
    pub content: String,
}

impl Post {
    /// Build a post from its file name and raw text
    pub fn parse(file_name: &str, extension: &str, raw: &str) -> Self {
        let (metadata, content) = frontmatter::split(raw);
        Self {
            file_name: file_name.to_string(),
            slug: slug_for(file_name, extension),
            metadata,
            content: content.to_string(),
        }
    }

    /// Title from front matter, falling back to the slug
    pub fn title(&self) -> &str {
        title_or_slug(&self.metadata, &self.slug)
    }
}

/// The slice of a post the index listing needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub slug: String,
    pub title: String,
    pub date: Option<String>,
}

impl ListingEntry {
    /// Build an entry from front matter only; the body is never converted
    pub fn from_source(file_name: &str, extension: &str, raw: &str) -> Self {
        let metadata = frontmatter::extract_metadata(raw);
        let slug = slug_for(file_name, extension);
        Self {
            title: title_or_slug(&metadata, &slug).to_string(),
            date: metadata.get("date").cloned(),
            slug,
        }
    }

    /// Key used to order the listing; a missing date sorts as the empty string
    pub fn sort_key(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    /// Date as shown in the listing
    pub fn display_date(&self) -> &str {
        self.date.as_deref().unwrap_or(UNKNOWN_DATE)
    }

    /// Site-absolute link to the post page
    pub fn link(&self) -> String {
        format!("/posts/{}", self.slug)
    }
}

/// Sort newest first by comparing raw `date` strings.
///
/// This is a plain string comparison, so it is only chronological for
/// zero-padded formats such as `YYYY-MM-DD`. The sort is stable: entries with
/// equal dates keep their incoming order.
pub fn sort_newest_first(entries: &mut [ListingEntry]) {
    entries.sort_by(|a, b| b.sort_key().cmp(a.sort_key()));
}

/// Strip the post extension from a file name
pub fn slug_for(file_name: &str, extension: &str) -> String {
    file_name
        .strip_suffix(extension)
        .and_then(|stem| stem.strip_suffix('.'))
        .unwrap_or(file_name)
        .to_string()
}

fn title_or_slug<'a>(metadata: &'a Metadata, slug: &'a str) -> &'a str {
    metadata.get("title").map(String::as_str).unwrap_or(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(slug: &str, date: Option<&str>) -> ListingEntry {
        ListingEntry {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_slug_for() {
        assert_eq!(slug_for("hello-world.md", "md"), "hello-world");
        assert_eq!(slug_for("notes.md.md", "md"), "notes.md");
        assert_eq!(slug_for("readme", "md"), "readme");
        assert_eq!(slug_for("post.markdown", "markdown"), "post");
    }

    #[test]
    fn test_post_parse() {
        let post = Post::parse("first.md", "md", "---\ntitle: First\n---\n\n# Body\n");
        assert_eq!(post.slug, "first");
        assert_eq!(post.title(), "First");
        assert_eq!(post.content, "# Body\n");
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let post = Post::parse("untitled-post.md", "md", "# Body\n");
        assert_eq!(post.title(), "untitled-post");

        let entry =
            ListingEntry::from_source("untitled-post.md", "md", "---\ndate: 2024-01-01\n---\n");
        assert_eq!(entry.title, "untitled-post");
        assert_eq!(entry.display_date(), "2024-01-01");
    }

    #[test]
    fn test_missing_date() {
        let entry = ListingEntry::from_source("a.md", "md", "---\ntitle: A\n---\n");
        assert_eq!(entry.date, None);
        assert_eq!(entry.sort_key(), "");
        assert_eq!(entry.display_date(), UNKNOWN_DATE);
        assert_eq!(entry.link(), "/posts/a");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries = vec![
            entry("a", Some("2024-01-01")),
            entry("b", Some("2024-03-01")),
            entry("c", Some("2023-12-31")),
        ];
        sort_newest_first(&mut entries);
        let dates: Vec<_> = entries.iter().map(|e| e.display_date()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-01", "2023-12-31"]);
    }

    #[test]
    fn test_sort_missing_date_last_and_stable() {
        let mut entries = vec![
            entry("undated", None),
            entry("x", Some("2024-05-05")),
            entry("y", Some("2024-05-05")),
            entry("old", Some("2020-01-01")),
        ];
        sort_newest_first(&mut entries);
        let slugs: Vec<_> = entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["x", "y", "old", "undated"]);
    }
}
