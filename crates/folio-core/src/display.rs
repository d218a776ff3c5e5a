//! Display items shared by the presentation layer.

use serde::{Deserialize, Serialize};

/// Whether a display item links somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayLink {
    /// Title and image link to `href`, with a trailing "Learn more" link.
    Linked { href: String },
    /// Title and image render as plain content.
    Plain,
}

impl DisplayLink {
    /// Build from an optional target; empty targets are treated as absent.
    pub fn from_href(href: Option<&str>) -> Self {
        match href.map(str::trim) {
            Some(href) if !href.is_empty() => Self::Linked {
                href: href.to_string(),
            },
            _ => Self::Plain,
        }
    }

    /// Link target, if any.
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Linked { href } => Some(href.as_str()),
            Self::Plain => None,
        }
    }
}

/// A titled card with optional image, as used on the projects page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub link: DisplayLink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_href() {
        assert_eq!(
            DisplayLink::from_href(Some("https://example.com")),
            DisplayLink::Linked {
                href: "https://example.com".to_string()
            }
        );
        assert_eq!(DisplayLink::from_href(Some("  ")), DisplayLink::Plain);
        assert_eq!(DisplayLink::from_href(None), DisplayLink::Plain);
    }

    #[test]
    fn test_href_accessor() {
        let linked = DisplayLink::from_href(Some("/about"));
        assert_eq!(linked.href(), Some("/about"));
        assert_eq!(DisplayLink::Plain.href(), None);
    }
}
