//! Check command - validate configuration and content

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::Path,
};

use color_eyre::eyre::{Result, bail};
use folio_core::{AuthorProfile, Config, Post, project::load_projects, tags::tag_slug};
use folio_generator::{
    build::{PROJECTS_FILE, RESERVED_SEGMENTS},
    collector::{AUTHOR_PAGE, find_post_files},
};

use super::{SitePaths, load_config};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and all content files.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect every error and warning for the site at `config_path`.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();
    let paths = SitePaths::from_config_path(config_path);

    let config = match load_config(config_path) {
        Ok(c) => {
            check_config_values(&c, &mut result);
            c
        }
        Err(e) => {
            result.add_error(format!("{e:#}"));
            return result;
        }
    };

    let category_dir = paths.content.join(&config.listing.category);
    if category_dir.is_dir() {
        validate_posts(&category_dir, &mut result);
    } else {
        result.add_warning(format!(
            "Post directory does not exist: {}",
            category_dir.display()
        ));
    }

    let author_path = paths.content.join(AUTHOR_PAGE);
    if author_path.is_file()
        && let Err(e) = AuthorProfile::load(&author_path)
    {
        result.add_error(format!("{}: {e}", author_path.display()));
    }

    let projects_path = paths.data.join(PROJECTS_FILE);
    if projects_path.is_file()
        && let Err(e) = load_projects(&projects_path)
    {
        result.add_error(e.to_string());
    }

    result
}

/// Parse every post, reporting per-file errors and slug conflicts.
fn validate_posts(dir: &Path, result: &mut ValidationResult) {
    let mut slugs: HashMap<String, String> = HashMap::new();
    let mut tags_by_slug: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    let files = match find_post_files(dir) {
        Ok(files) => files,
        Err(e) => {
            result.add_error(format!("{}: {e}", dir.display()));
            return;
        }
    };
    if files.is_empty() {
        result.add_warning(format!("No posts found in {}", dir.display()));
    }

    for path in &files {
        let path = path.as_path();
        let rel = path.strip_prefix(dir).unwrap_or(path);
        let post = match std::fs::read_to_string(path) {
            Ok(content) => Post::parse(&content, rel),
            Err(e) => {
                result.add_error(format!("{}: Failed to read file: {e}", path.display()));
                continue;
            }
        };
        let post = match post {
            Ok(p) => p,
            Err(e) => {
                result.add_error(e.to_string());
                continue;
            }
        };

        let first = post.slug.split('/').next().unwrap_or_default();
        if RESERVED_SEGMENTS.contains(&first) {
            result.add_error(format!(
                "{}: slug '{}' collides with a generated page",
                rel.display(),
                post.slug
            ));
        }
        if let Some(other) = slugs.insert(post.slug.clone(), rel.display().to_string()) {
            result.add_error(format!(
                "duplicate slug '{}' in {other} and {}",
                post.slug,
                rel.display()
            ));
        }
        if post.summary.trim().is_empty() {
            result.add_warning(format!("{}: no summary", rel.display()));
        }
        for tag in &post.tags {
            let slug = tag_slug(tag);
            if slug.is_empty() {
                result.add_warning(format!(
                    "{}: tag '{tag}' has no URL-safe characters and gets no tag page",
                    rel.display()
                ));
            } else {
                tags_by_slug.entry(slug).or_default().insert(tag.clone());
            }
        }
    }

    for (slug, names) in tags_by_slug {
        if names.len() > 1 {
            let names: Vec<_> = names.into_iter().collect();
            result.add_warning(format!(
                "tags {} share the page /tags/{slug}",
                names.join(", ")
            ));
        }
    }
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }
    if config.site.base_url.ends_with('/') {
        result.add_warning("site.base_url should not have a trailing slash");
    }
    if config.site.description.is_none() {
        result.add_warning("site.description is not set");
    }
}
