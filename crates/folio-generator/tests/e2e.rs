//! End-to-end tests for Folio.
//!
//! These tests lay out a small site on disk, build it and inspect the output.

use std::{fs, path::Path};

use folio_core::Config;
use folio_generator::{Builder, ContentStore, SearchIndex};
use tempfile::TempDir;

const CONFIG: &str = r#"
[site]
title = "philschmid blog"
base_url = "https://www.example.com"
description = "Notes on machine learning"
author = "Philipp"
repo = "https://github.com/example/blog"

[listing]
posts_per_page = 4
"#;

const TOPICS: &[(&str, &str)] = &[
    ("React", "Building UIs with React"),
    ("AWS", "Serverless inference"),
    ("BERT", "Fine-tuning transformers"),
    ("AWS", "Cost tracking"),
    ("Python", "Packaging tips"),
    ("AWS", "Lambda containers"),
    ("React", "Hooks in practice"),
    ("Rust", "Ownership for Pythonistas"),
    ("BERT", "Distillation"),
    ("Python", "Typing at scale"),
];

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Ten posts dated 2022-01-01 through 2022-01-10, plus author and projects.
fn sample_site() -> TempDir {
    let root = TempDir::new().unwrap();
    write(root.path(), "config.toml", CONFIG);

    for (i, (tag, summary)) in TOPICS.iter().enumerate() {
        let day = i + 1;
        write(
            root.path(),
            &format!("content/blog/post-{day:02}.md"),
            &format!(
                "---\ntitle: \"Post {day}\"\ndate: 2022-01-{day:02}\nsummary: \"{summary}\"\ntags: [{tag}, notes]\n---\n\nBody of post {day}.\n"
            ),
        );
    }

    write(
        root.path(),
        "content/authors/default.md",
        "---\nname: Philipp\noccupation: Technical Lead\ngithub: https://github.com/example\n---\n\nHi there.\n",
    );
    write(
        root.path(),
        "data/projects.toml",
        r#"
[[projects]]
title = "Infinity"
description = "Low latency inference"
href = "https://example.com/infinity"

[[projects]]
title = "Notebooks"
description = "A collection of notebooks"
"#,
    );

    root
}

fn build(root: &Path) -> folio_generator::BuildStats {
    let config = Config::load(&root.join("config.toml")).expect("config loads");
    Builder::new(config, root.join("content"), root.join("public"))
        .with_data_dir(root.join("data"))
        .build()
        .expect("build succeeds")
}

#[test]
fn test_full_site_build() {
    let root = sample_site();
    let stats = build(root.path());
    let public = root.path().join("public");

    assert_eq!(stats.posts, 10);
    assert_eq!(stats.listing_pages, 3);
    assert_eq!(stats.extra_pages, 2);

    for rel in [
        "index.html",
        "page/2/index.html",
        "page/3/index.html",
        "post-01/index.html",
        "post-10/index.html",
        "tags/aws/index.html",
        "tags/notes/index.html",
        "projects/index.html",
        "about/index.html",
        "search.json",
    ] {
        assert!(public.join(rel).exists(), "missing {rel}");
    }
}

#[test]
fn test_landing_page_shows_first_four() {
    let root = sample_site();
    build(root.path());
    let home = fs::read_to_string(root.path().join("public/index.html")).unwrap();

    assert_eq!(home.matches(r#"data-initial="true""#).count(), 4);
    assert!(home.contains("1 of 3"));
    assert!(home.contains(r#"<a href="/page/2" rel="next">Next</a>"#));
    assert!(!home.contains(r#"rel="prev""#));

    // Newest post first.
    let newest = home.find(r#"href="/post-10""#).unwrap();
    let oldest = home.find(r#"href="/post-01""#).unwrap();
    assert!(newest < oldest);
}

#[test]
fn test_second_page_links_back_to_root() {
    let root = sample_site();
    build(root.path());
    let page2 = fs::read_to_string(root.path().join("public/page/2/index.html")).unwrap();

    assert!(page2.contains("2 of 3"));
    assert!(page2.contains(r#"<a href="/" rel="prev">Previous</a>"#));
    assert!(page2.contains(r#"<a href="/page/3" rel="next">Next</a>"#));
}

#[test]
fn test_search_index_matches_landing_filter() {
    let root = sample_site();
    build(root.path());
    let json = fs::read_to_string(root.path().join("public/search.json")).unwrap();
    let index = SearchIndex::from_json(&json).unwrap();

    assert_eq!(index.posts.len(), 10);
    let hits: Vec<_> = index.search("react").iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(hits, vec!["post-07", "post-01"]);
    assert!(index.search("golang").is_empty());
}

#[test]
fn test_top_tags_from_store() {
    let root = sample_site();
    let store = ContentStore::new(root.path().join("content"), false);
    let counts = store.compute_tag_counts("blog").unwrap();

    assert_eq!(counts["notes"], 10);
    assert_eq!(counts["AWS"], 3);

    let top = folio_core::top_tags(&counts, folio_core::TOP_TAGS);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0], "notes");
    assert_eq!(top[1], "AWS");
}

#[test]
fn test_post_page_links() {
    let root = sample_site();
    build(root.path());
    let post = fs::read_to_string(root.path().join("public/post-03/index.html")).unwrap();

    assert!(post.contains("<h1>Post 3</h1>"));
    assert!(post.contains("January 3, 2022"));
    assert!(post.contains("Discuss on Twitter"));
    assert!(post.contains("https://github.com/example/blog/blob/master/content/blog/post-03.md"));
    assert!(post.contains(r#"<a href="/post-02" rel="prev">Post 2</a>"#));
    assert!(post.contains(r#"<a href="/post-04" rel="next">Post 4</a>"#));
}

#[test]
fn test_article_nav_at_list_ends() {
    let root = sample_site();
    build(root.path());
    let public = root.path().join("public");

    let oldest = fs::read_to_string(public.join("post-01/index.html")).unwrap();
    assert!(!oldest.contains("Previous Article"));
    assert!(oldest.contains(r#"<a href="/post-02" rel="next">Post 2</a>"#));

    let newest = fs::read_to_string(public.join("post-10/index.html")).unwrap();
    assert!(newest.contains(r#"<a href="/post-09" rel="prev">Post 9</a>"#));
    assert!(!newest.contains("Next Article"));
}

#[test]
fn test_projects_and_about_pages() {
    let root = sample_site();
    build(root.path());

    let projects = fs::read_to_string(root.path().join("public/projects/index.html")).unwrap();
    assert_eq!(projects.matches("Learn more &rarr;").count(), 1);
    assert!(projects.contains("<h2>Notebooks</h2>"));

    let about = fs::read_to_string(root.path().join("public/about/index.html")).unwrap();
    assert!(about.contains("<div>Technical Lead</div>"));
    assert!(about.contains("<p>Hi there.</p>"));
}
