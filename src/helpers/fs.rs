//! Directory tree traversal
//!
//! Deleting and copying a tree both depend on visiting paths in the right
//! order: a directory can only be removed once it is empty, and a file can
//! only be copied once its parent exists. The walk here is an explicit
//! depth-first traversal that yields one of those two orders, with children
//! sorted by name so the result is the same on every run. Symbolic links are
//! never followed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Order in which [`walk`] yields entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    /// Every directory before anything inside it (safe for copying)
    ShallowestFirst,
    /// Everything inside a directory before the directory (safe for deleting)
    DeepestFirst,
}

/// One file or directory below the walk root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    /// Path relative to the walk root
    pub relative: PathBuf,
    pub is_dir: bool,
}

/// List everything below `root` (the root itself excluded)
pub fn walk(root: &Path, order: WalkOrder) -> io::Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    visit(root, Path::new(""), order, &mut entries)?;
    Ok(entries)
}

fn visit(
    dir: &Path,
    relative: &Path,
    order: WalkOrder,
    out: &mut Vec<TreeEntry>,
) -> io::Result<()> {
    let mut children = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    children.sort_by_key(|child| child.file_name());

    for child in children {
        let entry = TreeEntry {
            path: child.path(),
            relative: relative.join(child.file_name()),
            is_dir: child.file_type()?.is_dir(),
        };

        if !entry.is_dir {
            out.push(entry);
            continue;
        }

        match order {
            WalkOrder::ShallowestFirst => {
                let (path, relative) = (entry.path.clone(), entry.relative.clone());
                out.push(entry);
                visit(&path, &relative, order, out)?;
            }
            WalkOrder::DeepestFirst => {
                visit(&entry.path, &entry.relative, order, out)?;
                out.push(entry);
            }
        }
    }

    Ok(())
}

/// A path that could not be removed or copied
#[derive(Debug)]
pub struct PathError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl PathError {
    fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Remove `root` and everything below it, deepest paths first.
///
/// Returns whether anything was removed. A missing `root` is not an error.
pub fn remove_tree(root: &Path) -> Result<bool, PathError> {
    let metadata = match fs::symlink_metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(PathError::new(root, e)),
    };

    if !metadata.is_dir() {
        fs::remove_file(root).map_err(|e| PathError::new(root, e))?;
        return Ok(true);
    }

    let entries = walk(root, WalkOrder::DeepestFirst).map_err(|e| PathError::new(root, e))?;
    for entry in entries {
        let removed = if entry.is_dir {
            fs::remove_dir(&entry.path)
        } else {
            fs::remove_file(&entry.path)
        };
        removed.map_err(|e| PathError::new(&entry.path, e))?;
    }

    fs::remove_dir(root).map_err(|e| PathError::new(root, e))?;
    Ok(true)
}

/// Result of [`copy_tree`]
#[derive(Debug, Default)]
pub struct CopyOutcome {
    /// Copied files, relative to the source root
    pub copied: Vec<PathBuf>,
    pub failed: Vec<PathError>,
}

/// Copy everything below `source` into `target`, keeping relative paths.
///
/// Only walking `source` or creating `target` can fail the whole copy; a file
/// or directory that cannot be copied is recorded in the outcome and the copy
/// carries on with the rest.
pub fn copy_tree(source: &Path, target: &Path) -> io::Result<CopyOutcome> {
    let entries = walk(source, WalkOrder::ShallowestFirst)?;
    fs::create_dir_all(target)?;

    let mut outcome = CopyOutcome::default();
    for entry in entries {
        let dest = target.join(&entry.relative);
        let result = if entry.is_dir {
            fs::create_dir_all(&dest)
        } else {
            copy_file(&entry.path, &dest)
        };

        match result {
            Ok(()) if !entry.is_dir => outcome.copied.push(entry.relative),
            Ok(()) => {}
            Err(e) => outcome.failed.push(PathError::new(&entry.path, e)),
        }
    }

    Ok(outcome)
}

fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;
    Ok(())
}

/// Write a file, creating its parent directories first
pub fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
