//! Content module - posts, front matter, markdown conversion and content sources

pub mod frontmatter;
mod markdown;
mod post;
mod source;

pub use frontmatter::{extract_metadata, strip_metadata, Metadata};
pub use markdown::{BlockTree, MarkdownEngine, MarkdownRenderer};
pub use post::{slug_for, sort_newest_first, ListingEntry, Post, UNKNOWN_DATE};
pub use source::{ContentSource, FsSource, MemorySource};
