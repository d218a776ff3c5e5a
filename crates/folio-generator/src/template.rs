//! HTML template system for page generation.
//!
//! Templates use plain `{{ variable }}` interpolation. Values are inserted
//! verbatim, so callers escape text before putting it into a context.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A simple template that supports variable interpolation.
///
/// `{{ name }}` is required, `{{ name? }}` renders as empty when unset.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Substituted values are never re-scanned, so a value containing `{{`
    /// is emitted as-is.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;

            let var_name = after[..end].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim(), true),
                None => (var_name, false),
            };

            match context.get(var_name) {
                Some(v) => out.push_str(v),
                None if optional => {}
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            }

            rest = &after[end + 2..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with default templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        self.register(Template::new("home", DEFAULT_HOME_TEMPLATE));
        self.register(Template::new("list", DEFAULT_LIST_TEMPLATE));
        self.register(Template::new("post", DEFAULT_POST_TEMPLATE));
        self.register(Template::new("projects", DEFAULT_PROJECTS_TEMPLATE));
        self.register(Template::new("author", DEFAULT_AUTHOR_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Default base HTML template.
pub const DEFAULT_BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
        :root {
            --color-primary: #ec4899;
            --color-text: #111827;
            --color-muted: #6b7280;
            --color-border: #e5e7eb;
            --color-bg: #ffffff;
        }
        * { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: system-ui, -apple-system, sans-serif;
            line-height: 1.6;
            color: var(--color-text);
            background: var(--color-bg);
        }
        a { color: inherit; text-decoration: none; }
        a:hover { color: var(--color-primary); }
        .container { max-width: 72rem; margin: 0 auto; padding: 0 1.5rem; }
        header.site-header {
            display: flex;
            align-items: center;
            justify-content: space-between;
            padding: 2rem 0;
        }
        .site-title { font-size: 1.5rem; font-weight: 600; }
        .nav-links a { padding: 0.5rem; font-weight: 500; }
        main { min-height: 60vh; }
        .post-list { list-style: none; padding: 0; display: grid; gap: 1rem; }
        .post-card {
            border: 1px solid var(--color-border);
            border-radius: 0.75rem;
            padding: 1rem;
        }
        .post-card time, .post-meta { color: var(--color-muted); }
        .article-nav { display: flex; justify-content: space-between; gap: 1rem; padding: 1rem 0; }
        .article-nav h2 { font-size: 0.75rem; text-transform: uppercase; color: var(--color-muted); margin: 0; }
        .tag {
            margin-right: 0.75rem;
            font-size: 0.875rem;
            font-weight: 500;
            text-transform: uppercase;
            color: var(--color-primary);
        }
        .pagination { display: flex; gap: 0.5rem; padding: 1.5rem 0 2rem; }
        .search input {
            width: 100%;
            max-width: 32rem;
            padding: 0.5rem 1rem;
            border: 1px solid var(--color-border);
            border-radius: 0.375rem;
        }
        .card {
            max-width: 544px;
            border: 2px solid var(--color-border);
            border-radius: 0.375rem;
            overflow: hidden;
        }
        .card img { width: 100%; object-fit: contain; }
        .card-body { padding: 1.5rem; }
        .project-grid { display: flex; flex-wrap: wrap; gap: 1rem; }
        .author { display: grid; grid-template-columns: 1fr 2fr; gap: 2rem; }
        .avatar { width: 12rem; height: 12rem; border-radius: 50%; }
        footer { padding: 2rem 0; color: var(--color-muted); font-size: 0.875rem; }
    </style>
</head>
<body>
    <div class="container">
        <header class="site-header">
            <a href="/" class="site-title" aria-label="{{ site_title }}">{{ site_title }}</a>
            <nav class="nav-links">{{ nav }}</nav>
        </header>
        <main>
{{ content }}
        </main>
        <footer>
            <span>&copy; {{ year }} {{ author? }}</span>
            <span>{{ site_description? }}</span>
        </footer>
    </div>
</body>
</html>
"##;

/// Landing page template with top tags, search box and listing.
pub const DEFAULT_HOME_TEMPLATE: &str = r##"<section class="home">
    <h1>{{ site_title }}</h1>
    <div class="top-tags">{{ top_tags? }}</div>
    <div class="search">
        <input id="search-input" aria-label="Search articles" type="text" placeholder="Search articles">
    </div>
</section>
<ul class="post-list">
{{ items }}
</ul>
<p id="no-posts"{{ no_posts_hidden? }}>No posts found.</p>
{{ pagination? }}
<script>
(function () {
    var input = document.getElementById('search-input');
    var cards = Array.prototype.slice.call(document.querySelectorAll('[data-search]'));
    var empty = document.getElementById('no-posts');
    var pager = document.querySelector('nav.pagination');
    input.addEventListener('input', function () {
        var q = input.value.toLowerCase();
        var shown = 0;
        cards.forEach(function (card) {
            var visible = q ? card.getAttribute('data-search').indexOf(q) !== -1
                            : card.getAttribute('data-initial') === 'true';
            card.hidden = !visible;
            if (visible) { shown += 1; }
        });
        empty.hidden = shown > 0;
        if (pager) { pager.hidden = q !== ''; }
    });
})();
</script>
"##;

/// Plain listing template (later listing pages and tag pages).
pub const DEFAULT_LIST_TEMPLATE: &str = r##"<section>
    <h1>{{ heading }}</h1>
</section>
<ul class="post-list">
{{ items }}
</ul>
{{ pagination? }}
"##;

/// Post layout template.
pub const DEFAULT_POST_TEMPLATE: &str = r##"<article class="post">
    <header>
        <h1>{{ title }}</h1>
        <div class="tags">{{ tags? }}</div>
    </header>
    <dl class="post-meta">
        <dt class="sr-only">Published on</dt>
        <dd><time datetime="{{ date_iso }}">{{ date_formatted }}</time></dd>
        <dd>{{ reading_time }}</dd>
        {{ repository? }}
    </dl>
    <div class="prose">
{{ content }}
    </div>
    <div class="post-links">{{ post_links }}</div>
    {{ article_nav? }}
</article>
"##;

/// Projects page template.
pub const DEFAULT_PROJECTS_TEMPLATE: &str = r##"<section>
    <h1>Projects</h1>
    <p>{{ description? }}</p>
</section>
<div class="project-grid">
{{ items }}
</div>
"##;

/// Author (about) page template.
pub const DEFAULT_AUTHOR_TEMPLATE: &str = r##"<section>
    <h1>{{ name }}</h1>
    <div class="tags">{{ tags? }}</div>
</section>
<div class="author">
    <div class="author-card">
        {{ avatar? }}
        <h3>{{ name }}</h3>
        {{ details? }}
        <div class="social">{{ social? }}</div>
    </div>
    <div class="prose">
{{ content }}
    </div>
</div>
"##;
