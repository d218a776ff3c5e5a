//! Serialized post list for client-side search.
//!
//! The index is the post list itself (slug, date, title, summary, tags) in
//! listing order. Queries against it follow the same matching rule as the
//! landing page filter.

use std::{fs, path::Path};

use folio_core::{Post, filter_posts};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Current on-disk format version.
pub const INDEX_VERSION: u32 = 1;

/// Search index errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for search index operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub version: u32,
    pub posts: Vec<Post>,
}

impl SearchIndex {
    /// Build an index from posts already in listing order.
    #[must_use]
    pub fn from_posts(posts: &[Post]) -> Self {
        Self {
            version: INDEX_VERSION,
            posts: posts.to_vec(),
        }
    }

    /// Posts matching `query`, in listing order.
    pub fn search(&self, query: &str) -> Vec<&Post> {
        filter_posts(&self.posts, query)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the index to `path`, creating parent directories as needed.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = self.to_json()?;
        fs::write(path, &json)?;
        debug!(path = %path.display(), bytes = json.len(), posts = self.posts.len(), "wrote search index");
        Ok(())
    }
}
