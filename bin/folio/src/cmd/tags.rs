//! Tags command - prints the most used tags

use std::{fmt::Write as _, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{TagCounts, top_tags};
use folio_generator::ContentStore;

use super::{SitePaths, load_config};

/// Run the tags command. `limit` defaults to `listing.top_tags`.
pub fn run(config_path: &Path, limit: Option<usize>) -> Result<()> {
    let config = load_config(config_path)?;
    let paths = SitePaths::from_config_path(config_path);

    let counts = ContentStore::new(&paths.content, config.build.drafts)
        .compute_tag_counts(&config.listing.category)
        .wrap_err("Failed to count tags")?;

    print!("{}", render(&counts, limit.unwrap_or(config.listing.top_tags)));
    Ok(())
}

/// One `count  tag` line per ranked tag.
pub fn render(counts: &TagCounts, limit: usize) -> String {
    let mut out = String::new();
    for tag in top_tags(counts, limit) {
        let _ = writeln!(out, "{:>4}  {tag}", counts[tag]);
    }
    out
}
