//! Folio CLI
//!
//! Static blog and portfolio generator.
//!
//! This is the binary entry point. The command implementations live in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(name = "folio", version, about = "A static blog and portfolio generator")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },
    /// Filter posts the way the landing page search box does
    Search {
        /// Free-text query; empty lists a page of posts
        #[arg(default_value = "")]
        query: String,
        /// Listing page shown when the query is empty
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Print the most used tags
    Tags {
        /// Number of tags (defaults to listing.top_tags)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, drafts } => {
            folio::cmd::build::run(&cli.config, output.as_deref(), drafts)?;
        }
        Commands::Search { query, page } => {
            folio::cmd::search::run(&cli.config, &query, page)?;
        }
        Commands::Tags { limit } => {
            folio::cmd::tags::run(&cli.config, limit)?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
