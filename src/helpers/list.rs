//! Post listing HTML

use crate::content::ListingEntry;

/// Listing fragment used when there are no posts
pub const NO_POSTS: &str = "<p>No blog posts found.</p>";

/// Listing fragment used when the posts could not be enumerated
pub const LISTING_ERROR: &str = "<p>Error loading blog posts.</p>";

/// Generate the post listing as HTML, one `<article>` per entry in the given
/// order. An empty slice yields [`NO_POSTS`].
pub fn blog_list(entries: &[ListingEntry]) -> String {
    if entries.is_empty() {
        return NO_POSTS.to_string();
    }

    let mut html = String::from("<section>\n");
    for entry in entries {
        html.push_str("  <article class=\"blog-preview\">\n");
        html.push_str(&format!(
            "    <h3><a href=\"{}\">{}</a></h3>\n",
            entry.link(),
            entry.title
        ));
        html.push_str(&format!(
            "    <p class=\"meta\"><small>{}</small></p>\n",
            entry.display_date()
        ));
        html.push_str("  </article>\n");
    }
    html.push_str("</section>");
    html
}
