//! Front-matter parsing
//!
//! A front-matter block is a `---` line at the very start of the text, any
//! number of `key: value` lines, and a closing `---` line:
//!
//! ```text
//! ---
//! title: Hello World
//! date: 2024-01-15
//! ---
//! ```
//!
//! The opening delimiter must sit at offset 0. Leading whitespace before it
//! is not tolerated, and an opening delimiter without a closing one means
//! there is no front matter at all.

use indexmap::IndexMap;

/// Front-matter key/value pairs, in the order they were declared
pub type Metadata = IndexMap<String, String>;

/// Extract the front-matter mapping. Text without a block yields an empty map.
pub fn extract_metadata(text: &str) -> Metadata {
    match find_block(text) {
        Some((block, _)) => parse_block(block),
        None => Metadata::new(),
    }
}

/// Remove the front-matter block and any whitespace following it.
/// Text without a block is returned unchanged.
pub fn strip_metadata(text: &str) -> &str {
    match find_block(text) {
        Some((_, rest)) => rest.trim_start(),
        None => text,
    }
}

/// Extract and strip with a single scan
pub fn split(text: &str) -> (Metadata, &str) {
    match find_block(text) {
        Some((block, rest)) => (parse_block(block), rest.trim_start()),
        None => (Metadata::new(), text),
    }
}

/// Returns the lines between the delimiters and everything after the closing one
fn find_block(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');

    let opening = lines.next()?;
    if !opening.ends_with('\n') || !is_delimiter(opening) {
        return None;
    }

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            return Some((&text[block_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

fn parse_block(block: &str) -> Metadata {
    let mut metadata = Metadata::new();
    for line in block.lines() {
        // Lines without a colon carry no pair
        if let Some((key, value)) = line.split_once(':') {
            metadata.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    metadata
}
