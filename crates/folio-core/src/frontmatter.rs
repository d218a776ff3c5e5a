//! Frontmatter parsing for content files.

use std::path::Path;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{CoreError, Result};

/// Frontmatter metadata for blog posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Post title (required).
    #[serde(default)]
    pub title: String,

    /// Publication date, ISO-8601 date or datetime.
    #[serde(default)]
    pub date: Option<String>,

    /// Last modification date.
    #[serde(default)]
    pub lastmod: Option<String>,

    /// Short summary shown on listing cards.
    #[serde(default)]
    pub summary: Option<String>,

    /// Tags in author order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether this is a draft.
    #[serde(default)]
    pub draft: bool,

    /// Explicit slug overriding the path-derived one.
    #[serde(default)]
    pub slug: Option<String>,

    /// Code repository backing the post ("View Code" link).
    #[serde(default)]
    pub repository: Option<String>,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter into any deserializable metadata type.
///
/// Content without a frontmatter block yields `T::default()` and the full
/// content as body.
pub fn parse_frontmatter_as<T>(content: &str, path: &Path) -> Result<(T, String)>
where
    T: DeserializeOwned + Default,
{
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((T::default(), content.to_string()));
    };

    let metadata: T = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => parse_toml_metadata(fm_str, path)?,
    };

    Ok((metadata, body.to_string()))
}

/// Parse post frontmatter from a string.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    parse_frontmatter_as(content, path)
}

/// TOML has a native datetime type; top-level datetimes are flattened to
/// their ISO-8601 text so metadata structs can keep plain string fields.
fn parse_toml_metadata<T: DeserializeOwned>(fm_str: &str, path: &Path) -> Result<T> {
    let mut table: toml::Table =
        toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    for (_, value) in table.iter_mut() {
        let text = match value {
            toml::Value::Datetime(dt) => dt.to_string(),
            _ => continue,
        };
        *value = toml::Value::String(text);
    }

    toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| CoreError::frontmatter(path, e.to_string()))
}

impl Frontmatter {
    /// Validate required fields for a post.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.title.is_empty() {
            return Err(CoreError::frontmatter(path, "title is required"));
        }
        if self.date.as_deref().is_none_or(str::is_empty) {
            return Err(CoreError::frontmatter(path, "date is required"));
        }
        Ok(())
    }
}
