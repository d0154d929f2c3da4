//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::Metadata;
use crate::templates::Template;
use crate::Site;

/// Scaffold used when the site has no `scaffolds/post.md`
const DEFAULT_SCAFFOLD: &str = "---\ntitle: {{title}}\ndate: {{date}}\n---\n\n";

/// Create a new post in the posts directory and return its path.
///
/// The date is written as `YYYY-MM-DD`, the format the post listing sorts
/// correctly.
pub fn run(site: &Site, title: &str) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    create_post(site, title, &today)
}

fn create_post(site: &Site, title: &str, date: &str) -> Result<PathBuf> {
    let source = site.source();
    let target_dir = source.posts_dir();
    fs::create_dir_all(target_dir)?;

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let filename = site
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &date[..4.min(date.len())]);
    let file_path = target_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = site.base_dir.join("scaffolds/post.md");
    let scaffold = if scaffold_path.exists() {
        Template::from_file(&scaffold_path)?
    } else {
        Template::new(DEFAULT_SCAFFOLD)
    };

    let mut values = Metadata::new();
    values.insert("title".to_string(), title.to_string());
    values.insert("date".to_string(), date.to_string());
    fs::write(&file_path, scaffold.render(&values))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::extract_metadata;

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "Hello, World!", "2024-07-04").unwrap();
        assert_eq!(path, dir.path().join("content/posts/hello-world.md"));

        let metadata = extract_metadata(&fs::read_to_string(&path).unwrap());
        assert_eq!(metadata["title"], "Hello, World!");
        assert_eq!(metadata["date"], "2024-07-04");
    }

    #[test]
    fn test_existing_post_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        create_post(&site, "Twice", "2024-01-01").unwrap();
        assert!(create_post(&site, "Twice", "2024-01-02").is_err());
    }

    #[test]
    fn test_site_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("scaffolds")).unwrap();
        fs::write(
            dir.path().join("scaffolds/post.md"),
            "---\ntitle: {{title}}\ndate: {{date}}\ndescription:\n---\n\nWrite here.\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "Scaffolded", "2024-01-01").unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.ends_with("Write here.\n"));
        assert!(text.contains("title: Scaffolded\n"));
    }
}
