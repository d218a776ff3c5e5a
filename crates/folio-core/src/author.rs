//! Author profile for the about page.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    frontmatter::parse_frontmatter_as,
};

/// Author details read from the frontmatter of an author page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub name: String,

    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default)]
    pub occupation: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub twitter: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,

    #[serde(default)]
    pub github: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Markdown body of the author page.
    #[serde(skip)]
    pub body: String,
}

/// Kinds of social links shown under the author avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialKind {
    Mail,
    Github,
    Linkedin,
    Twitter,
}

impl SocialKind {
    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mail => "Mail",
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Twitter => "Twitter",
        }
    }
}

impl AuthorProfile {
    /// Parse an author page.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let (mut profile, body): (AuthorProfile, String) = parse_frontmatter_as(content, path)?;
        if profile.name.trim().is_empty() {
            return Err(CoreError::frontmatter(path, "author name is required"));
        }
        profile.body = body;
        Ok(profile)
    }

    /// Load an author page from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Social links for the fields that are set, in display order.
    pub fn social_links(&self) -> Vec<(SocialKind, String)> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }

        let mut links = Vec::new();
        if let Some(email) = present(&self.email) {
            links.push((SocialKind::Mail, format!("mailto:{email}")));
        }
        for (kind, value) in [
            (SocialKind::Github, &self.github),
            (SocialKind::Linkedin, &self.linkedin),
            (SocialKind::Twitter, &self.twitter),
        ] {
            if let Some(href) = present(value) {
                links.push((kind, href.to_string()));
            }
        }
        links
    }
}
