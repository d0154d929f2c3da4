//! URL helper functions

/// Point relative static asset references at the site root from a page
/// `depth` directories below it.
///
/// Only attribute values that start with `static_dir/` (optionally `./`) are
/// rewritten, e.g. `href="static/css/site.css"` becomes
/// `href="../../static/css/site.css"` for depth 2. Root-relative and absolute
/// URLs already resolve from any depth and are left alone, as is any
/// occurrence of the word in page text.
///
/// # Examples
/// ```ignore
/// relocate_static_refs(r#"<img src="static/a.png">"#, "static", 2)
/// // -> <img src="../../static/a.png">
/// ```
pub fn relocate_static_refs(html: &str, static_dir: &str, depth: usize) -> String {
    if depth == 0 {
        return html.to_string();
    }

    let up = "../".repeat(depth);
    let mut result = html.to_string();
    for quote in ['"', '\''] {
        for prefix in ["", "./"] {
            let from = format!("={}{}{}/", quote, prefix, static_dir);
            let to = format!("={}{}{}/", quote, up, static_dir);
            result = result.replace(&from, &to);
        }
    }
    result
}
