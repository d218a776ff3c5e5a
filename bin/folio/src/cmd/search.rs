//! Search command - runs the landing page filter from the terminal

use std::{fmt::Write as _, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{Config, Listing, Post, display_posts};
use folio_generator::ContentStore;

use super::{SitePaths, load_config};

/// Run the search command and print the result.
pub fn run(config_path: &Path, query: &str, page: usize) -> Result<()> {
    let config = load_config(config_path)?;
    let paths = SitePaths::from_config_path(config_path);

    let posts = ContentStore::new(&paths.content, config.build.drafts)
        .load_all_posts(&config.listing.category)
        .wrap_err("Failed to load posts")?;

    print!("{}", render(&config, &posts, query, page));
    Ok(())
}

/// Render what the landing listing shows for `query` and `page`.
pub fn render(config: &Config, posts: &[Post], query: &str, page: usize) -> String {
    let listing = display_posts(posts, query, page, config.listing.posts_per_page);
    tracing::debug!(query, page, shown = listing.posts().len(), "search");

    if listing.is_empty() {
        return "No posts found.\n".to_string();
    }

    let mut out = String::new();
    for post in listing.posts() {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            post.date.format("%Y-%m-%d"),
            post.url_path(),
            post.title
        );
    }

    if let Listing::Search { posts } = &listing {
        let _ = writeln!(out, "{} match(es)", posts.len());
    }
    if let Some(pagination) = listing.pagination() {
        let _ = writeln!(out, "Page {}", pagination.label());
    }

    out
}
