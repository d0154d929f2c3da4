//! Helper functions for the generator
//!
//! Listing markup, static reference rewriting and ordered tree walks.

pub mod fs;
mod list;
mod url;

pub use list::*;
pub use url::*;
