//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_generator::{BuildStats, Builder};

use super::{SitePaths, load_config};

/// Run the build command.
///
/// `output` overrides `build.output_dir`; `drafts` forces drafts on.
pub fn run(config_path: &Path, output: Option<&Path>, drafts: bool) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, drafts, "Starting build");

    let mut config = load_config(config_path)?;
    let paths = SitePaths::from_config_path(config_path);

    if drafts {
        config.build.drafts = true;
    }
    let output = match output {
        Some(dir) => dir.to_path_buf(),
        None => paths.root.join(&config.build.output_dir),
    };

    tracing::debug!(?config, "Loaded configuration");

    let stats = Builder::new(config, &paths.content, &output)
        .with_data_dir(&paths.data)
        .build()
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Posts:         {}", stats.posts);
    println!("  Listing pages: {}", stats.listing_pages);
    println!("  Tag pages:     {}", stats.tag_pages);
    println!("  Other pages:   {}", stats.extra_pages);
    println!();
    println!("  Duration:      {:.2}s", duration.as_secs_f64());
    println!("  Output:        {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_build_uses_config_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[site]\ntitle = \"T\"\nbase_url = \"https://example.com\"\n\n[build]\noutput_dir = \"dist\"\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("content/blog")).unwrap();
        fs::write(
            dir.path().join("content/blog/hello.md"),
            "---\ntitle: Hello\ndate: 2022-01-01\n---\nHi\n",
        )
        .unwrap();

        let stats = run(&dir.path().join("config.toml"), None, false).unwrap();

        assert_eq!(stats.posts, 1);
        assert!(dir.path().join("dist/hello/index.html").exists());
    }

    #[test]
    fn test_build_drafts_flag() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[site]\ntitle = \"T\"\nbase_url = \"https://example.com\"\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("content/blog")).unwrap();
        fs::write(
            dir.path().join("content/blog/wip.md"),
            "---\ntitle: WIP\ndate: 2022-01-01\ndraft: true\n---\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let stats = run(&dir.path().join("config.toml"), Some(&out), false).unwrap();
        assert_eq!(stats.posts, 0);

        let stats = run(&dir.path().join("config.toml"), Some(&out), true).unwrap();
        assert_eq!(stats.posts, 1);
        assert!(out.join("wip/index.html").exists());
    }
}
