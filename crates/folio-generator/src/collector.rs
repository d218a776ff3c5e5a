//! Content collection.
//!
//! Walks a category directory of the content tree and loads every post in
//! it. Posts come back newest first; the order is fully deterministic even
//! though files are parsed in parallel.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use folio_core::{AuthorProfile, CoreError, Post, TagCounts, tags::tag_counts};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Location of the author page inside the content directory.
pub const AUTHOR_PAGE: &str = "authors/default.md";

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Content parse error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Two posts resolve to the same URL.
    #[error("duplicate slug '{slug}' in {} and {}", first.display(), second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Read access to the on-disk content tree.
#[derive(Debug, Clone)]
pub struct ContentStore {
    content_dir: PathBuf,
    drafts: bool,
}

impl ContentStore {
    /// Create a store over `content_dir`. Drafts are dropped unless `drafts`.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>, drafts: bool) -> Self {
        Self {
            content_dir: content_dir.into(),
            drafts,
        }
    }

    /// Root of the content tree.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Load every post under `category`, newest first.
    ///
    /// Files that fail to parse are logged and skipped. A missing category
    /// directory yields an empty list.
    pub fn load_all_posts(&self, category: &str) -> Result<Vec<Post>> {
        let dir = self.content_dir.join(category);
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "category directory not found");
            return Ok(Vec::new());
        }

        info!(dir = %dir.display(), "collecting posts");
        let files = find_post_files(&dir)?;
        debug!(count = files.len(), "found post files");

        let mut posts: Vec<Post> = files
            .par_iter()
            .filter_map(|path| {
                let rel = path.strip_prefix(&dir).unwrap_or(path);
                match read_post(path, rel) {
                    Ok(post) if post.draft && !self.drafts => {
                        debug!(slug = %post.slug, "skipping draft");
                        None
                    }
                    Ok(post) => Some(post),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to parse post");
                        None
                    }
                }
            })
            .collect();

        check_unique_slugs(&posts)?;

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));

        info!(posts = posts.len(), "post collection complete");
        Ok(posts)
    }

    /// Tag occurrence counts across every post under `category`.
    pub fn compute_tag_counts(&self, category: &str) -> Result<TagCounts> {
        let posts = self.load_all_posts(category)?;
        let counts = tag_counts(&posts);
        debug!(tags = counts.len(), "computed tag counts");
        Ok(counts)
    }

    /// Raw content of a standalone page, relative to the content directory.
    ///
    /// Returns `None` when the file does not exist.
    pub fn load_page(&self, rel_path: &Path) -> Result<Option<String>> {
        let path = self.content_dir.join(rel_path);
        if !path.is_file() {
            debug!(path = %path.display(), "page not found");
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// The author profile from `authors/default.md`, if present.
    pub fn load_author(&self) -> Result<Option<AuthorProfile>> {
        let rel = Path::new(AUTHOR_PAGE);
        match self.load_page(rel)? {
            Some(content) => Ok(Some(AuthorProfile::parse(&content, rel)?)),
            None => Ok(None),
        }
    }
}

/// Entries starting with `.` or `_` below the walk root are never posts.
pub fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name.starts_with('_'))
}

/// Markdown source, by extension in any case.
pub fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Every post source under `dir`, sorted by path.
pub fn find_post_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_entry(|e| !is_hidden(e)) {
        let entry = entry?;
        if entry.file_type().is_file() && is_post_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn read_post(path: &Path, rel: &Path) -> std::result::Result<Post, CoreError> {
    let content = fs::read_to_string(path)?;
    Post::parse(&content, rel)
}

fn check_unique_slugs(posts: &[Post]) -> Result<()> {
    let mut seen: HashMap<&str, &Post> = HashMap::with_capacity(posts.len());
    for post in posts {
        if let Some(first) = seen.insert(post.slug.as_str(), post) {
            return Err(CollectorError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.source_path.clone().unwrap_or_default(),
                second: post.source_path.clone().unwrap_or_default(),
            });
        }
    }
    Ok(())
}
