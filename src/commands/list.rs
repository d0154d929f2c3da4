//! List site content

use anyhow::Result;

use crate::content::ListingEntry;
use crate::generator::collect_listing;
use crate::report::TracingReporter;
use crate::Site;

/// Posts in the order the index page lists them
pub fn posts(site: &Site) -> Result<Vec<ListingEntry>> {
    Ok(collect_listing(&site.source(), &TracingReporter)?)
}

/// Print the posts, newest first
pub fn run(site: &Site) -> Result<()> {
    let posts = posts(site)?;
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {} - {} [{}]", post.display_date(), post.title, post.link());
    }
    Ok(())
}
