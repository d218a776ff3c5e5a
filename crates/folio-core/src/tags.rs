//! Tag counting and ranking.

use std::collections::HashMap;

use crate::post::Post;

/// Number of tags shown in the landing page's top-tags strip.
pub const TOP_TAGS: usize = 5;

/// Tag name to number of occurrences across a set of posts.
pub type TagCounts = HashMap<String, usize>;

/// Count tag occurrences across `posts`.
pub fn tag_counts<'a>(posts: impl IntoIterator<Item = &'a Post>) -> TagCounts {
    let mut counts = TagCounts::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag.clone()).or_default() += 1;
        }
    }
    counts
}

/// The `limit` most frequent tags, most frequent first.
///
/// Equal counts keep the map's iteration order, which for a `HashMap` is
/// unspecified and may differ between runs.
pub fn top_tags(counts: &TagCounts, limit: usize) -> Vec<&str> {
    let mut ranked: Vec<(&str, usize)> = counts.iter().map(|(t, c)| (t.as_str(), *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(limit).map(|(tag, _)| tag).collect()
}

/// URL-safe slug for a tag, used for `/tags/{slug}` pages.
pub fn tag_slug(tag: &str) -> String {
    tag.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
