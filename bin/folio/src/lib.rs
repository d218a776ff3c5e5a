//! Folio CLI Library
//!
//! Command implementations for the `folio` binary, kept in a library so they
//! can be tested without spawning a process.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, search, tags, check)

pub mod cmd;

pub use folio_core::{Config, Post};
pub use folio_generator::{BuildStats, Builder, ContentStore};

/// Initialize tracing with the specified verbosity level.
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// `RUST_LOG` directives are honored on top of the chosen level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
