//! Folio Core Library
//!
//! Core types, configuration and listing logic for the Folio blog generator.

pub mod author;
pub mod config;
pub mod display;
pub mod error;
pub mod frontmatter;
pub mod listing;
pub mod pagination;
pub mod post;
pub mod project;
pub mod tags;

pub use author::AuthorProfile;
pub use config::Config;
pub use display::{Card, DisplayLink};
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
pub use listing::{Listing, display_posts, filter_posts, paginate};
pub use pagination::Pagination;
pub use post::Post;
pub use project::Project;
pub use tags::{TOP_TAGS, TagCounts, top_tags};
