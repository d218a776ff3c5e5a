//! HTML generation.
//!
//! Fragment helpers (`*_html`) produce escaped snippets; [`HtmlGenerator`]
//! assembles them into full pages through the template registry.

use chrono::{DateTime, Datelike, Utc};
use folio_core::{
    AuthorProfile, Card, Config, DisplayLink, Listing, Pagination, Post, Project, TagCounts,
    display_posts, listing::search_text, tags::tag_slug, top_tags,
};
use pulldown_cmark::{Options, Parser, html};
use thiserror::Error;
use tracing::debug;

use crate::template::{TemplateContext, TemplateError, TemplateRegistry};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Invalid page data.
    #[error("invalid page data: {0}")]
    InvalidPage(String),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a CommonMark body to HTML.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Long-form date, e.g. `May 10, 2022`.
fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Link to a tag page. Tags without a usable slug have no page and render
/// as plain text.
pub fn tag_html(tag: &str) -> String {
    let slug = tag_slug(tag);
    if slug.is_empty() {
        return format!(r#"<span class="tag">{}</span>"#, escape_html(tag));
    }
    format!(r#"<a href="/tags/{slug}" class="tag">{}</a>"#, escape_html(tag))
}

/// "Previous Article" / "Next Article" footer, `None` when there is neither.
pub fn article_nav_html(prev: Option<&Post>, next: Option<&Post>) -> Option<String> {
    if prev.is_none() && next.is_none() {
        return None;
    }

    let item = |label: &str, rel: &str, post: &Post| {
        format!(
            r#"<div><h2>{label}</h2><a href="{}" rel="{rel}">{}</a></div>"#,
            post.url_path(),
            escape_html(&post.title)
        )
    };
    let mut out = String::from(r#"<nav class="article-nav">"#);
    if let Some(p) = prev {
        out.push_str(&item("Previous Article", "prev", p));
    }
    if let Some(n) = next {
        out.push_str(&item("Next Article", "next", n));
    }
    out.push_str("</nav>");
    Some(out)
}

fn tags_html(tags: &[String]) -> String {
    tags.iter().map(|t| tag_html(t)).collect::<Vec<_>>().join("\n")
}

fn post_card(post: &Post, attrs: &str) -> String {
    let href = escape_html(&post.url_path());
    let title = escape_html(&post.title);

    format!(
        r#"<li class="post-card"{attrs}>
    <article>
        <dl>
            <dt class="sr-only">Published on</dt>
            <dd><time datetime="{date_iso}">{date}</time></dd>
        </dl>
        <div>
            <h3><a href="{href}">{title}</a></h3>
            <div class="tags">{tags}</div>
        </div>
        <div class="summary">{summary}</div>
        <div><a href="{href}" aria-label="Read &quot;{title}&quot;">Read more &rarr;</a></div>
    </article>
</li>"#,
        date_iso = post.date.format("%Y-%m-%d"),
        date = format_date(&post.date),
        tags = tags_html(&post.tags),
        summary = escape_html(&post.summary),
    )
}

/// Listing card for a post.
pub fn list_card_html(post: &Post) -> String {
    post_card(post, "")
}

/// Listing card carrying the lowercased search text for the in-page filter.
///
/// `initial` marks cards that belong to the first listing page; every other
/// card starts hidden.
pub fn searchable_card_html(post: &Post, initial: bool) -> String {
    let mut attrs = format!(
        r#" data-search="{}" data-initial="{initial}""#,
        escape_html(&search_text(post).to_lowercase())
    );
    if !initial {
        attrs.push_str(" hidden");
    }
    post_card(post, &attrs)
}

/// Previous/next navigation, or `None` when the control is hidden.
pub fn pagination_html(pagination: &Pagination) -> Option<String> {
    if !pagination.is_visible() {
        return None;
    }

    let mut parts = Vec::with_capacity(3);
    if let Some(prev) = pagination.prev_href() {
        parts.push(format!(r#"<a href="{prev}" rel="prev">Previous</a>"#));
    }
    parts.push(format!("<span>{}</span>", pagination.label()));
    if let Some(next) = pagination.next_href() {
        parts.push(format!(r#"<a href="{next}" rel="next">Next</a>"#));
    }

    Some(format!(
        r#"<nav class="pagination">{}</nav>"#,
        parts.join("\n")
    ))
}

/// Project-style card.
pub fn card_html(card: &Card) -> String {
    let title = escape_html(&card.title);
    let image = card.image.as_deref().map(|src| {
        let img = format!(r#"<img alt="{title}" src="{}" width="544" height="306">"#, escape_html(src));
        match &card.link {
            DisplayLink::Linked { href } => format!(
                r#"<a href="{}" aria-label="Link to {title}">{img}</a>"#,
                escape_html(href)
            ),
            DisplayLink::Plain => img,
        }
    });

    let (heading, learn_more) = match &card.link {
        DisplayLink::Linked { href } => {
            let href = escape_html(href);
            (
                format!(r#"<a href="{href}" aria-label="Link to {title}">{title}</a>"#),
                format!(r#"<a href="{href}" aria-label="Link to {title}">Learn more &rarr;</a>"#),
            )
        }
        DisplayLink::Plain => (title.clone(), String::new()),
    };

    format!(
        r#"<div class="card">
    {image}
    <div class="card-body">
        <h2>{heading}</h2>
        <p>{description}</p>
        {learn_more}
    </div>
</div>"#,
        image = image.unwrap_or_default(),
        description = escape_html(&card.description),
    )
}

/// Full-page renderer bound to one site configuration.
#[derive(Debug)]
pub struct HtmlGenerator<'a> {
    config: &'a Config,
    templates: TemplateRegistry,
}

impl<'a> HtmlGenerator<'a> {
    /// Create a generator with the built-in templates.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self::with_templates(config, TemplateRegistry::new())
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: &'a Config, templates: TemplateRegistry) -> Self {
        Self { config, templates }
    }

    /// Landing page.
    ///
    /// Every post is emitted so the search box can filter the full list in
    /// the browser; only the first page is visible until a query is typed.
    pub fn generate_home(&self, posts: &[Post], tag_counts: &TagCounts) -> Result<String> {
        let per_page = self.config.listing.posts_per_page;
        let listing = display_posts(posts, "", 1, per_page);
        let initial = listing.posts().len();

        let items = posts
            .iter()
            .enumerate()
            .map(|(i, post)| searchable_card_html(post, i < initial))
            .collect::<Vec<_>>()
            .join("\n");

        let top = top_tags(tag_counts, self.config.listing.top_tags)
            .into_iter()
            .map(tag_html)
            .collect::<Vec<_>>()
            .join("\n");

        let mut ctx = TemplateContext::new()
            .with_var("site_title", escape_html(&self.config.site.title))
            .with_var("items", items)
            .with_var("top_tags", top);
        if !listing.is_empty() {
            ctx.insert("no_posts_hidden", " hidden");
        }
        if let Some(nav) = listing.pagination().as_ref().and_then(pagination_html) {
            ctx.insert("pagination", nav);
        }

        debug!(posts = posts.len(), initial, "generating landing page");
        let inner = self.templates.render("home", &ctx)?;
        self.wrap(&self.config.site.title, &inner)
    }

    /// Listing page `page` (two or more; page one is the landing page).
    pub fn generate_listing_page(&self, posts: &[Post], page: usize) -> Result<String> {
        let listing = display_posts(posts, "", page, self.config.listing.posts_per_page);
        let Listing::Page { posts: slice, .. } = &listing else {
            return Err(HtmlError::InvalidPage(format!("no posts for page {page}")));
        };
        if slice.is_empty() {
            return Err(HtmlError::InvalidPage(format!("page {page} is out of range")));
        }

        let items = slice.iter().map(list_card_html).collect::<Vec<_>>().join("\n");
        let mut ctx = TemplateContext::new()
            .with_var("heading", "All Posts")
            .with_var("items", items);
        if let Some(nav) = listing.pagination().as_ref().and_then(pagination_html) {
            ctx.insert("pagination", nav);
        }

        let inner = self.templates.render("list", &ctx)?;
        self.wrap(&format!("Page {page}"), &inner)
    }

    /// Single post page.
    ///
    /// `prev` is the post published before this one and `next` the one
    /// published after it; either is omitted at the ends of the list.
    pub fn generate_post(
        &self,
        post: &Post,
        prev: Option<&Post>,
        next: Option<&Post>,
    ) -> Result<String> {
        debug!(slug = %post.slug, "generating post");

        let mut ctx = TemplateContext::new()
            .with_var("title", escape_html(&post.title))
            .with_var("tags", tags_html(&post.tags))
            .with_var("date_iso", post.date.format("%Y-%m-%d").to_string())
            .with_var("date_formatted", format_date(&post.date))
            .with_var("reading_time", format!("{} min read", post.reading_time()))
            .with_var("content", render_markdown(&post.body))
            .with_var("post_links", self.post_links(post));
        if let Some(nav) = article_nav_html(prev, next) {
            ctx.insert("article_nav", nav);
        }
        if let Some(repo) = post.repository.as_deref().filter(|r| !r.trim().is_empty()) {
            ctx.insert(
                "repository",
                format!(r#"<a href="{}">View Code</a>"#, escape_html(repo)),
            );
        }

        let inner = self.templates.render("post", &ctx)?;
        self.wrap(&post.title, &inner)
    }

    fn post_links(&self, post: &Post) -> String {
        let url = self.config.url_for(&post.url_path());
        let discuss = format!(
            "https://mobile.twitter.com/search?q={}",
            urlencoding::encode(&url)
        );
        let mut links = vec![format!(
            r#"<a href="{}" rel="nofollow">Discuss on Twitter</a>"#,
            escape_html(&discuss)
        )];

        if let (Some(repo), Some(source)) = (self.config.site.repo.as_deref(), &post.source_path) {
            let edit = format!(
                "{}/blob/master/content/{}/{}",
                repo.trim_end_matches('/'),
                self.config.listing.category,
                source.to_string_lossy().replace('\\', "/")
            );
            links.push(format!(r#"<a href="{}">View on GitHub</a>"#, escape_html(&edit)));
        }

        links.join(" &bull; ")
    }

    /// Projects page.
    pub fn generate_projects(&self, projects: &[Project]) -> Result<String> {
        let items = projects
            .iter()
            .map(|p| card_html(&p.card()))
            .collect::<Vec<_>>()
            .join("\n");

        let mut ctx = TemplateContext::new().with_var("items", items);
        if let Some(desc) = &self.config.site.description {
            ctx.insert("description", escape_html(desc));
        }

        let inner = self.templates.render("projects", &ctx)?;
        self.wrap("Projects", &inner)
    }

    /// Author (about) page.
    pub fn generate_author(&self, author: &AuthorProfile) -> Result<String> {
        let name = escape_html(&author.name);
        let mut ctx = TemplateContext::new()
            .with_var("name", name.as_str())
            .with_var("tags", tags_html(&author.tags))
            .with_var("content", render_markdown(&author.body));

        if let Some(avatar) = &author.avatar {
            ctx.insert(
                "avatar",
                format!(r#"<img src="{}" alt="avatar" class="avatar">"#, escape_html(avatar)),
            );
        }

        let details = [&author.location, &author.occupation, &author.company]
            .into_iter()
            .flatten()
            .filter(|d| !d.trim().is_empty())
            .map(|d| format!("<div>{}</div>", escape_html(d)))
            .collect::<Vec<_>>()
            .join("\n");
        ctx.insert("details", details);

        let social = author
            .social_links()
            .into_iter()
            .map(|(kind, href)| {
                format!(r#"<a href="{}">{}</a>"#, escape_html(&href), kind.label())
            })
            .collect::<Vec<_>>()
            .join("\n");
        ctx.insert("social", social);

        let inner = self.templates.render("author", &ctx)?;
        self.wrap(&format!("About - {}", author.name), &inner)
    }

    /// Page listing every post carrying `tag`.
    pub fn generate_tag_page(&self, tag: &str, posts: &[&Post]) -> Result<String> {
        let items = posts
            .iter()
            .map(|p| list_card_html(p))
            .collect::<Vec<_>>()
            .join("\n");
        let ctx = TemplateContext::new()
            .with_var("heading", escape_html(tag))
            .with_var("items", items);

        let inner = self.templates.render("list", &ctx)?;
        self.wrap(tag, &inner)
    }

    /// Wrap inner content in the base layout with header and footer.
    fn wrap(&self, title: &str, inner: &str) -> Result<String> {
        let site = &self.config.site;
        let page_title = if title == site.title {
            escape_html(title)
        } else {
            format!("{} | {}", escape_html(title), escape_html(&site.title))
        };

        let nav = self
            .config
            .nav
            .iter()
            .map(|link| {
                format!(
                    r#"<a href="{}">{}</a>"#,
                    escape_html(&link.href),
                    escape_html(&link.title)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let lang = site.locale.split('-').next().unwrap_or("en");
        let mut ctx = TemplateContext::new()
            .with_var("lang", escape_html(lang))
            .with_var("title", page_title)
            .with_var("site_title", escape_html(&site.title))
            .with_var("nav", nav)
            .with_var("content", inner)
            .with_var("year", Utc::now().year().to_string());
        if let Some(author) = &site.author {
            ctx.insert("author", escape_html(author));
        }
        if let Some(desc) = &site.description {
            ctx.insert("site_description", escape_html(desc));
        }

        Ok(self.templates.render("base", &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use chrono::TimeZone;
    use folio_core::config::SiteConfig;

    use super::*;

    fn test_config() -> Config {
        Config::new(SiteConfig {
            title: "Test Blog".to_string(),
            base_url: "https://example.com".to_string(),
            description: Some("Notes".to_string()),
            author: Some("Ada".to_string()),
            locale: "en-US".to_string(),
            repo: Some("https://github.com/ada/blog".to_string()),
        })
    }

    fn post(i: u32, tags: &[&str]) -> Post {
        Post::new(
            format!("post-{i}"),
            Utc.with_ymd_and_hms(2022, 1, i.clamp(1, 28), 0, 0, 0).unwrap(),
            format!("Post {i}"),
            format!("Summary {i}"),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_markdown() {
        let html = render_markdown("# Title\n\n~~old~~ | a |\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_tag_html() {
        assert_eq!(
            tag_html("Machine Learning"),
            r#"<a href="/tags/machine-learning" class="tag">Machine Learning</a>"#
        );
        assert_eq!(tag_html("+++"), r#"<span class="tag">+++</span>"#);
    }

    #[test]
    fn test_list_card_html() {
        let mut p = post(10, &["AWS"]);
        p.title = "Deploy <BERT>".to_string();
        let html = list_card_html(&p);

        assert!(html.contains(r#"<a href="/post-10">Deploy &lt;BERT&gt;</a>"#));
        assert!(html.contains("January 10, 2022"));
        assert!(html.contains(r#"datetime="2022-01-10""#));
        assert!(html.contains("/tags/aws"));
        assert!(html.contains("Read more &rarr;"));
        assert!(!html.contains("data-search"));
    }

    #[test]
    fn test_searchable_card_html() {
        let p = post(1, &["React"]);
        let shown = searchable_card_html(&p, true);
        assert!(shown.contains(r#"data-search="post 1summary 1react""#));
        assert!(shown.contains(r#"data-initial="true""#));
        assert!(!shown.contains(" hidden>"));

        let hidden = searchable_card_html(&p, false);
        assert!(hidden.contains(r#"data-initial="false" hidden"#));
    }

    #[test]
    fn test_pagination_html_first_page() {
        let html = pagination_html(&Pagination::new(1, 3)).expect("visible");
        assert!(!html.contains("Previous"));
        assert!(html.contains("1 of 3"));
        assert!(html.contains(r#"<a href="/page/2" rel="next">Next</a>"#));
    }

    #[test]
    fn test_pagination_html_second_page_links_root() {
        let html = pagination_html(&Pagination::new(2, 3)).expect("visible");
        assert!(html.contains(r#"<a href="/" rel="prev">Previous</a>"#));
        assert!(html.contains(r#"<a href="/page/3" rel="next">Next</a>"#));
    }

    #[test]
    fn test_pagination_html_hidden() {
        assert!(pagination_html(&Pagination::new(1, 1)).is_none());
        assert!(pagination_html(&Pagination::new(1, 0)).is_none());
    }

    #[test]
    fn test_card_html_linked_and_plain() {
        let linked = Card {
            title: "Infinity".to_string(),
            description: "Inference".to_string(),
            image: Some("/img/inf.png".to_string()),
            link: DisplayLink::Linked {
                href: "https://example.com/inf".to_string(),
            },
        };
        let html = card_html(&linked);
        assert!(html.contains("Learn more &rarr;"));
        assert_eq!(html.matches(r#"href="https://example.com/inf""#).count(), 3);

        let plain = Card {
            link: DisplayLink::Plain,
            image: None,
            ..linked
        };
        let html = card_html(&plain);
        assert!(!html.contains("<a "));
        assert!(!html.contains("<img"));
        assert!(html.contains("<h2>Infinity</h2>"));
    }

    #[test]
    fn test_generate_home_first_page() {
        let config = test_config();
        let generator = HtmlGenerator::new(&config);
        let posts: Vec<Post> = (1..=10).rev().map(|i| post(i, &["rust"])).collect();
        let counts: TagCounts = HashMap::from([("rust".to_string(), 10)]);

        let html = generator.generate_home(&posts, &counts).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test Blog</title>"));
        assert_eq!(html.matches(r#"data-initial="true""#).count(), 4);
        assert_eq!(html.matches(r#"data-initial="false""#).count(), 6);
        assert!(html.contains("1 of 3"));
        assert!(html.contains(r#"<p id="no-posts" hidden>No posts found.</p>"#));
        assert!(html.contains(r#"id="search-input""#));
        assert!(html.contains(r#"href="/tags/rust""#));
    }

    #[test]
    fn test_generate_home_without_posts() {
        let config = test_config();
        let generator = HtmlGenerator::new(&config);

        let html = generator.generate_home(&[], &TagCounts::new()).unwrap();

        assert!(html.contains(r#"<p id="no-posts">No posts found.</p>"#));
        assert!(!html.contains(r#"class="pagination""#));
    }

    #[test]
    fn test_generate_listing_page() {
        let config = test_config();
        let generator = HtmlGenerator::new(&config);
        let posts: Vec<Post> = (1..=10).rev().map(|i| post(i, &[])).collect();

        let html = generator.generate_listing_page(&posts, 3).unwrap();
        assert!(html.contains("3 of 3"));
        assert!(html.contains(r#"href="/page/2" rel="prev""#));
        assert!(!html.contains("rel=\"next\""));
        assert_eq!(html.matches(r#"class="post-card""#).count(), 2);

        assert!(generator.generate_listing_page(&posts, 4).is_err());
    }

    #[test]
    fn test_generate_post() {
        let config = test_config();
        let generator = HtmlGenerator::new(&config);
        let mut p = post(5, &["AWS"]);
        p.body = "Hello **world**".to_string();
        p.repository = Some("https://github.com/ada/code".to_string());
        p.source_path = Some(PathBuf::from("post-5.md"));

        let html = generator.generate_post(&p, None, None).unwrap();

        assert!(html.contains("<title>Post 5 | Test Blog</title>"));
        assert!(!html.contains("article-nav"));
        assert!(html.contains("<strong>world</strong>"));
        assert!(html.contains("1 min read"));
        assert!(html.contains(r#"<a href="https://github.com/ada/code">View Code</a>"#));
        assert!(html.contains(
            "https://mobile.twitter.com/search?q=https%3A%2F%2Fexample.com%2Fpost-5"
        ));
        assert!(html.contains("https://github.com/ada/blog/blob/master/content/blog/post-5.md"));
    }

    #[test]
    fn test_generate_post_article_nav() {
        let config = test_config();
        let generator = HtmlGenerator::new(&config);
        let (newer, middle, older) = (post(3, &[]), post(2, &[]), post(1, &[]));

        let html = generator.generate_post(&middle, Some(&older), Some(&newer)).unwrap();
        assert!(html.contains(
            r#"<h2>Previous Article</h2><a href="/post-1" rel="prev">Post 1</a>"#
        ));
        assert!(html.contains(r#"<h2>Next Article</h2><a href="/post-3" rel="next">Post 3</a>"#));

        let html = generator.generate_post(&newer, Some(&middle), None).unwrap();
        assert!(html.contains("Previous Article"));
        assert!(!html.contains("Next Article"));

        let html = generator.generate_post(&older, None, Some(&middle)).unwrap();
        assert!(!html.contains("Previous Article"));
        assert!(html.contains(r#"<a href="/post-2" rel="next">Post 2</a>"#));
    }

    #[test]
    fn test_generate_projects() {
        let config = test_config();
        let generator = HtmlGenerator::new(&config);
        let projects = vec![Project {
            title: "Infinity".to_string(),
            description: "Inference".to_string(),
            role: None,
            img_src: None,
            href: None,
        }];

        let html = generator.generate_projects(&projects).unwrap();
        assert!(html.contains("<h2>Infinity</h2>"));
        assert!(html.contains("<title>Projects | Test Blog</title>"));
    }

    #[test]
    fn test_generate_author() {
        let config = test_config();
        let generator = HtmlGenerator::new(&config);
        let author = AuthorProfile {
            name: "Ada".to_string(),
            company: Some("Engines Ltd".to_string()),
            github: Some("https://github.com/ada".to_string()),
            body: "I like *engines*.".to_string(),
            ..AuthorProfile::default()
        };

        let html = generator.generate_author(&author).unwrap();
        assert!(html.contains("<div>Engines Ltd</div>"));
        assert!(html.contains(r#"<a href="https://github.com/ada">GitHub</a>"#));
        assert!(html.contains("<em>engines</em>"));
        assert!(html.contains("About - Ada"));
    }

    #[test]
    fn test_generate_tag_page() {
        let config = test_config();
        let generator = HtmlGenerator::new(&config);
        let posts = [post(1, &["rust"]), post(2, &["rust"])];
        let refs: Vec<&Post> = posts.iter().collect();

        let html = generator.generate_tag_page("rust", &refs).unwrap();
        assert!(html.contains("<h1>rust</h1>"));
        assert_eq!(html.matches(r#"class="post-card""#).count(), 2);
    }

    #[test]
    fn test_nav_links_rendered() {
        let config = test_config();
        let html = HtmlGenerator::new(&config)
            .generate_tag_page("x", &[])
            .unwrap();
        assert!(html.contains(r#"<a href="/projects">Projects</a>"#));
        assert!(html.contains(r#"<a href="/about">About</a>"#));
        assert!(html.contains("Ada"));
    }
}
