//! Landing page post filtering and pagination.
//!
//! A query matches a post when the lowercased concatenation of its title,
//! summary and tags contains the lowercased query. Search results are never
//! paginated: while a query is active the whole match set is shown and the
//! pagination control is suppressed.

use crate::{
    pagination::{Pagination, total_pages},
    post::Post,
};

/// What the landing listing shows for a given query and page.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<'a> {
    /// No query: one page of the full list.
    Page {
        posts: &'a [Post],
        pagination: Pagination,
    },

    /// Active query: every matching post, in source order.
    Search { posts: Vec<&'a Post> },

    /// Nothing to show; rendered as "No posts found."
    Empty,
}

impl<'a> Listing<'a> {
    /// Posts to render, in display order.
    pub fn posts(&self) -> Vec<&'a Post> {
        match self {
            Self::Page { posts, .. } => {
                let posts: &'a [Post] = posts;
                posts.iter().collect()
            }
            Self::Search { posts } => posts.clone(),
            Self::Empty => Vec::new(),
        }
    }

    /// Pagination to render, if any.
    pub fn pagination(&self) -> Option<Pagination> {
        match self {
            Self::Page { pagination, .. } if pagination.is_visible() => Some(*pagination),
            _ => None,
        }
    }

    /// Whether the caller should show "No posts found."
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Text a query is matched against: title, summary and tags, no separators.
pub fn search_text(post: &Post) -> String {
    let mut text = String::with_capacity(
        post.title.len() + post.summary.len() + post.tags.iter().map(String::len).sum::<usize>(),
    );
    text.push_str(&post.title);
    text.push_str(&post.summary);
    for tag in &post.tags {
        text.push_str(tag);
    }
    text
}

/// Whether `post` matches `query`. The empty query matches everything.
pub fn matches(post: &Post, query: &str) -> bool {
    query.is_empty() || search_text(post).to_lowercase().contains(&query.to_lowercase())
}

/// All posts matching `query`, preserving source order.
pub fn filter_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    if query.is_empty() {
        return posts.iter().collect();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| search_text(post).to_lowercase().contains(&needle))
        .collect()
}

/// Paginate a slice of items.
///
/// Returns the one-based `page` slice clipped to the slice bounds together
/// with the total page count. Out-of-range pages yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> (&[T], usize) {
    let total = total_pages(items.len(), per_page);
    if page == 0 || per_page == 0 {
        return (&[], total);
    }

    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return (&[], total);
    }
    let end = start.saturating_add(per_page).min(items.len());

    (&items[start..end], total)
}

/// Decide what the landing listing shows.
pub fn display_posts<'a>(
    posts: &'a [Post],
    query: &str,
    page: usize,
    per_page: usize,
) -> Listing<'a> {
    if query.is_empty() {
        if posts.is_empty() {
            return Listing::Empty;
        }
        let (slice, total) = paginate(posts, page, per_page);
        if page == 0 || page > total {
            return Listing::Empty;
        }
        return Listing::Page {
            posts: slice,
            pagination: Pagination::new(page, total),
        };
    }

    let matched = filter_posts(posts, query);
    if matched.is_empty() {
        Listing::Empty
    } else {
        Listing::Search { posts: matched }
    }
}
