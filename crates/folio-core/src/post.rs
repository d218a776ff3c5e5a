//! Post records.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    frontmatter::parse_frontmatter,
};

/// Reading speed used for reading-time estimates.
const WORDS_PER_MINUTE: usize = 200;

/// A blog post loaded from the content store.
///
/// Posts are immutable once loaded; the listing and tag modules only ever
/// borrow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL-safe unique identifier; the post lives at `/{slug}`.
    pub slug: String,

    /// Publication date.
    pub date: DateTime<Utc>,

    /// Post title.
    pub title: String,

    /// Listing summary (may be empty).
    #[serde(default)]
    pub summary: String,

    /// Tags in author order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Last modification date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<DateTime<Utc>>,

    /// Whether the post is a draft.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,

    /// Code repository backing the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Markdown body without frontmatter.
    #[serde(skip)]
    pub body: String,

    /// Source file relative to the content directory.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Post {
    /// Create a post from its listing fields.
    pub fn new(
        slug: impl Into<String>,
        date: DateTime<Utc>,
        title: impl Into<String>,
        summary: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            date,
            title: title.into(),
            summary: summary.into(),
            tags,
            lastmod: None,
            draft: false,
            repository: None,
            body: String::new(),
            source_path: None,
        }
    }

    /// Parse a post from file content.
    ///
    /// `rel_path` is the path relative to the category directory and is used
    /// both for error messages and to derive the slug.
    pub fn parse(content: &str, rel_path: &Path) -> Result<Self> {
        let (fm, body) = parse_frontmatter(content, rel_path)?;
        fm.validate(rel_path)?;

        let raw_date = fm.date.as_deref().unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| {
            CoreError::frontmatter(rel_path, format!("invalid date: {raw_date}"))
        })?;

        let lastmod = match fm.lastmod.as_deref() {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| {
                CoreError::frontmatter(rel_path, format!("invalid lastmod: {raw}"))
            })?),
            None => None,
        };

        let slug = match fm.slug {
            Some(slug) => slug.trim_matches('/').to_string(),
            None => slug_from_path(rel_path)
                .ok_or_else(|| CoreError::parse(rel_path, "cannot derive slug from path"))?,
        };

        if slug.is_empty() {
            return Err(CoreError::frontmatter(rel_path, "slug cannot be empty"));
        }
        if slug.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
            return Err(CoreError::frontmatter(
                rel_path,
                format!("slug has an invalid segment: {slug}"),
            ));
        }
        if let Some(c) = slug.chars().find(|&c| c != '/' && !is_slug_char(c)) {
            return Err(CoreError::frontmatter(
                rel_path,
                format!("slug contains a character that is not URL-safe: {c:?} in {slug}"),
            ));
        }

        Ok(Self {
            slug,
            date,
            title: fm.title,
            summary: fm.summary.unwrap_or_default(),
            tags: fm.tags,
            lastmod,
            draft: fm.draft,
            repository: fm.repository,
            body,
            source_path: Some(rel_path.to_path_buf()),
        })
    }

    /// URL path of the post page.
    pub fn url_path(&self) -> String {
        format!("/{}", self.slug)
    }

    /// Estimated reading time in minutes (at least one).
    pub fn reading_time(&self) -> usize {
        (self.body.split_whitespace().count() / WORDS_PER_MINUTE).max(1)
    }
}

/// Parse an ISO-8601 date or datetime.
///
/// Accepts RFC 3339 (`2024-01-14T10:00:00Z`), a naive datetime
/// (`2024-01-14T10:00:00`, taken as UTC) or a plain date (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Derive a slug from a path relative to the category directory.
///
/// - `hello-world.md` → `hello-world`
/// - `guides/setup.md` → `guides/setup`
/// - `guides/setup/index.md` → `guides/setup`
pub fn slug_from_path(rel_path: &Path) -> Option<String> {
    let stem = rel_path.file_stem()?.to_str()?;
    let parent = rel_path.parent().unwrap_or(Path::new(""));

    let mut segments: Vec<String> = parent
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(slug_segment)
        .collect();

    if stem != "index" {
        segments.push(slug_segment(stem));
    }

    let slug = segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    (!slug.is_empty()).then_some(slug)
}

/// Characters allowed in a slug segment: letters, digits and `-._~`.
pub fn is_slug_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

fn slug_segment(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .map(|c| if is_slug_char(c) { c } else { '-' })
        .collect()
}
