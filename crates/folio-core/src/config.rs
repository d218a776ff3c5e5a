//! Site configuration management.
//!
//! The configuration is loaded once at startup and then passed by reference
//! into every renderer. Nothing mutates it after [`Config::load`] returns.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Landing page listing settings.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Header navigation links.
    #[serde(default = "default_nav")]
    pub nav: Vec<NavLink>,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Client-side search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description shown under the title.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Locale used for date formatting hints.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Source repository, used for "View on GitHub" links on posts.
    #[serde(default)]
    pub repo: Option<String>,
}

/// Listing configuration for the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Number of posts per listing page.
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,

    /// Number of tags shown in the top-tags strip.
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,

    /// Content sub-directory holding the posts.
    #[serde(default = "default_category")]
    pub category: String,
}

/// A header navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link label.
    pub title: String,

    /// Link target.
    pub href: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether to include drafts.
    #[serde(default)]
    pub drafts: bool,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether the search index is emitted.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// File name of the serialized post list.
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_posts_per_page() -> usize {
    4
}

fn default_top_tags() -> usize {
    crate::tags::TOP_TAGS
}

fn default_category() -> String {
    "blog".to_string()
}

fn default_nav() -> Vec<NavLink> {
    [("Blog", "/"), ("Projects", "/projects"), ("About", "/about")]
        .into_iter()
        .map(|(title, href)| NavLink {
            title: title.to_string(),
            href: href.to_string(),
        })
        .collect()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_true() -> bool {
    true
}

fn default_index_file() -> String {
    "search.json".to_string()
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_posts_per_page(),
            top_tags: default_top_tags(),
            category: default_category(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            drafts: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            index_file: default_index_file(),
        }
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the site.
    #[must_use]
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site,
            listing: ListingConfig::default(),
            nav: default_nav(),
            build: BuildConfig::default(),
            search: SearchConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.listing.posts_per_page == 0 {
            return Err(CoreError::config(
                "listing.posts_per_page must be greater than zero",
            ));
        }

        if self.listing.category.trim_matches('/').is_empty() {
            return Err(CoreError::config("listing.category cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
