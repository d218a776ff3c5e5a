//! Build orchestration.
//!
//! Coordinates the full site build process.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{
    Config, CoreError, Post,
    pagination::total_pages,
    project::load_projects,
    tags::{tag_counts, tag_slug},
};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collector::{CollectorError, ContentStore},
    html::{HtmlError, HtmlGenerator},
    search::{SearchError, SearchIndex},
};

/// First path segments owned by generated pages.
pub const RESERVED_SEGMENTS: &[&str] = &["page", "tags", "projects", "about"];

/// Projects data file inside the data directory.
pub const PROJECTS_FILE: &str = "projects.toml";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Search index error.
    #[error("search index error: {0}")]
    Search(#[from] SearchError),

    /// Data file error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A post slug collides with a generated page.
    #[error("slug '{0}' collides with a generated page")]
    ReservedSlug(String),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of post pages generated.
    pub posts: usize,

    /// Number of listing pages generated, landing page included.
    pub listing_pages: usize,

    /// Number of tag pages generated.
    pub tag_pages: usize,

    /// Projects and about pages generated.
    pub extra_pages: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    content_dir: PathBuf,
    output_dir: PathBuf,
    data_dir: Option<PathBuf>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: Config,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            data_dir: None,
        }
    }

    /// Set the directory holding `projects.toml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Load content
        let store = ContentStore::new(&self.content_dir, self.config.build.drafts);
        let posts = store.load_all_posts(&self.config.listing.category)?;
        check_reserved_slugs(&posts)?;

        // 2. Clean output directory
        self.clean_output()?;

        let generator = HtmlGenerator::new(&self.config);

        // 3. Listing pages
        stats.listing_pages = self.generate_listing(&generator, &posts)?;

        // 4. Post pages
        stats.posts = self.generate_posts(&generator, &posts)?;

        // 5. Tag pages
        stats.tag_pages = self.generate_tag_pages(&generator, &posts)?;

        // 6. Projects and about
        if self.generate_projects(&generator)? {
            stats.extra_pages += 1;
        }
        if let Some(author) = store.load_author()? {
            let html = generator.generate_author(&author)?;
            self.write_page("about", &html)?;
            stats.extra_pages += 1;
        }

        // 7. Search index
        if self.config.search.enabled {
            let path = self.output_dir.join(&self.config.search.index_file);
            SearchIndex::from_posts(&posts).write_to_file(&path)?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            posts = stats.posts,
            listing_pages = stats.listing_pages,
            tag_pages = stats.tag_pages,
            extra_pages = stats.extra_pages,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Write `html` to `{url_path}/index.html` under the output directory.
    fn write_page(&self, url_path: &str, html: &str) -> Result<PathBuf> {
        let relative = url_path.trim_matches('/');
        let output_path = if relative.is_empty() {
            self.output_dir.join("index.html")
        } else {
            self.output_dir.join(relative).join("index.html")
        };

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        debug!(path = %output_path.display(), "wrote page");
        Ok(output_path)
    }

    /// Landing page plus `/page/{n}` for every later page.
    fn generate_listing(&self, generator: &HtmlGenerator<'_>, posts: &[Post]) -> Result<usize> {
        let counts = tag_counts(posts);
        let home = generator.generate_home(posts, &counts)?;
        self.write_page("/", &home)?;

        let total = total_pages(posts.len(), self.config.listing.posts_per_page);
        for page in 2..=total {
            let html = generator.generate_listing_page(posts, page)?;
            self.write_page(&format!("page/{page}"), &html)?;
        }

        Ok(total.max(1))
    }

    /// `posts` is newest first, so the previous article is the next index.
    fn generate_posts(&self, generator: &HtmlGenerator<'_>, posts: &[Post]) -> Result<usize> {
        info!(count = posts.len(), "generating post pages");

        posts
            .par_iter()
            .enumerate()
            .map(|(i, post)| {
                let prev = posts.get(i + 1);
                let next = i.checked_sub(1).and_then(|j| posts.get(j));
                let html = generator.generate_post(post, prev, next)?;
                self.write_page(&post.slug, &html)?;
                Ok::<_, BuildError>(())
            })
            .collect::<Result<Vec<()>>>()
            .map(|written| written.len())
    }

    /// One page per tag slug, listing its posts newest first.
    fn generate_tag_pages(&self, generator: &HtmlGenerator<'_>, posts: &[Post]) -> Result<usize> {
        let mut by_slug: BTreeMap<String, (&str, Vec<&Post>)> = BTreeMap::new();
        for post in posts {
            for tag in &post.tags {
                let slug = tag_slug(tag);
                if slug.is_empty() {
                    continue;
                }
                let entry = by_slug.entry(slug).or_insert_with(|| (tag.as_str(), Vec::new()));
                if entry.1.last().is_none_or(|last| last.slug != post.slug) {
                    entry.1.push(post);
                }
            }
        }

        for (slug, (name, tagged)) in &by_slug {
            let html = generator.generate_tag_page(name, tagged)?;
            self.write_page(&format!("tags/{slug}"), &html)?;
        }

        debug!(count = by_slug.len(), "generated tag pages");
        Ok(by_slug.len())
    }

    /// Returns whether a projects page was written.
    fn generate_projects(&self, generator: &HtmlGenerator<'_>) -> Result<bool> {
        let Some(path) = self.projects_path() else {
            return Ok(false);
        };
        if !path.is_file() {
            debug!(path = %path.display(), "no projects file");
            return Ok(false);
        }

        let projects = load_projects(&path)?;
        let html = generator.generate_projects(&projects)?;
        self.write_page("projects", &html)?;
        Ok(true)
    }

    fn projects_path(&self) -> Option<PathBuf> {
        self.data_dir.as_deref().map(|dir| dir.join(PROJECTS_FILE))
    }

    /// Output directory of this builder.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn check_reserved_slugs(posts: &[Post]) -> Result<()> {
    for post in posts {
        let first = post.slug.split('/').next().unwrap_or_default();
        if RESERVED_SEGMENTS.contains(&first) {
            return Err(BuildError::ReservedSlug(post.slug.clone()));
        }
    }
    Ok(())
}
