//! Folio Generator Library
//!
//! Static site generation engine for Folio.
//!
//! # Modules
//!
//! - [`collector`] - Content store: post loading and tag counts
//! - [`template`] - HTML template system with variable interpolation
//! - [`html`] - Page and fragment rendering
//! - [`search`] - Serialized post list for client-side search
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod html;
pub mod search;
pub mod template;

pub use build::{BuildError, BuildStats, Builder};
pub use collector::{CollectorError, ContentStore};
pub use html::HtmlGenerator;
pub use search::SearchIndex;
pub use template::{Template, TemplateContext, TemplateRegistry};
