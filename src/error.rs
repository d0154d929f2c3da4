//! Fatal build errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole build.
///
/// Anything that goes wrong for a single post or a single static asset is
/// reported and skipped instead; it never becomes a `BuildError`.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to remove {path:?} while cleaning the output directory")]
    Clean {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output directory {path:?}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template not found: {name}")]
    Template {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
