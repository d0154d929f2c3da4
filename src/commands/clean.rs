//! Clean the public directory

use anyhow::{Context, Result};

use crate::helpers::fs::remove_tree;
use crate::Site;

/// Remove the public directory
pub fn run(site: &Site) -> Result<()> {
    let removed = remove_tree(&site.public_dir)
        .map_err(|e| e.source)
        .with_context(|| format!("Failed to clean {:?}", site.public_dir))?;

    if removed {
        tracing::info!("Deleted: {:?}", site.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_clean() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(site.public_dir.join("posts/a")).unwrap();
        fs::write(site.public_dir.join("posts/a/index.html"), "x").unwrap();

        run(&site).unwrap();
        assert!(!site.public_dir.exists());

        // Nothing left to clean is fine
        run(&site).unwrap();
    }
}
