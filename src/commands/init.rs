//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::helpers::fs::write_file;
use crate::{Site, CONFIG_FILE};

const CONFIG: &str = r#"# mdpress configuration
# Every path is relative to this file.

title: My Site

# Directory
content_dir: content
posts_dir: posts          # inside content_dir
templates_dir: templates
base_template: base.html
static_dir: static
public_dir: dist

# Writing
post_extension: md
new_post_name: :title.md
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false
"#;

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>My Site</title>
  <link rel="stylesheet" href="static/css/style.css">
</head>
<body>
  <nav>
    <a class="{{activeHome}}" href="/about.html">About</a>
    <a class="{{activePosts}}" href="/posts.html">Posts</a>
  </nav>
  <main>
{{content}}
  </main>
</body>
</html>
"#;

const ABOUT: &str = "<h1>About</h1>\n<p>Write something about yourself in content/about.html.</p>\n";

const POSTS: &str = "<h1>Posts</h1>\n{{blog_list}}\n";

const STYLE: &str = r#"body { max-width: 42rem; margin: 0 auto; font-family: sans-serif; }
nav a { margin-right: 1rem; }
nav a.active { font-weight: bold; }
.blog-preview .meta { color: #666; }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        "---\ntitle: Hello World\ndate: {}\ndescription: The first post\n---\n\n\
         Welcome! This post lives in `content/posts/hello-world.md`.\n\n\
         ## Writing posts\n\n\
         Create a new post with `mdpress new \"My New Post\"`, then build the site:\n\n\
         ```bash\n$ mdpress generate\n```\n",
        today
    );

    let files = [
        (CONFIG_FILE, CONFIG.to_string()),
        ("templates/base.html", BASE_TEMPLATE.to_string()),
        ("content/about.html", ABOUT.to_string()),
        ("content/posts.html", POSTS.to_string()),
        ("content/posts/hello-world.md", sample_post),
        ("static/css/style.css", STYLE.to_string()),
    ];

    for (relative, contents) in files {
        let path = target_dir.join(relative);
        write_file(&path, &contents).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Created {:?}", path);
    }

    fs::create_dir_all(target_dir.join("scaffolds"))?;

    Ok(())
}

/// Run the init command with an existing site
pub fn run(site: &Site) -> Result<()> {
    init_site(&site.base_dir)
}
