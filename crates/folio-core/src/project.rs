//! Portfolio project data.
//!
//! Projects are static data kept in a TOML file:
//!
//! ```toml
//! [[projects]]
//! title = "Hugging Face Infinity"
//! description = "Containerized inference pipelines."
//! role = "Technical Lead"
//! img_src = "/static/projects/infinity-logo.png"
//! href = "https://huggingface.co/infinity"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    display::{Card, DisplayLink},
    error::{CoreError, Result},
};

/// A single portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,

    /// The author's role on the project.
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub img_src: Option<String>,

    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectsFile {
    #[serde(default)]
    projects: Vec<Project>,
}

impl Project {
    /// Card representation of this project.
    pub fn card(&self) -> Card {
        Card {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.img_src.clone().filter(|src| !src.trim().is_empty()),
            link: DisplayLink::from_href(self.href.as_deref()),
        }
    }
}

/// Parse projects from TOML text. Order is preserved.
pub fn parse_projects(content: &str, path: &Path) -> Result<Vec<Project>> {
    let file: ProjectsFile =
        toml::from_str(content).map_err(|e| CoreError::parse(path, e.to_string()))?;

    for (i, project) in file.projects.iter().enumerate() {
        if project.title.trim().is_empty() {
            return Err(CoreError::parse(
                path,
                format!("project #{} has an empty title", i + 1),
            ));
        }
    }

    Ok(file.projects)
}

/// Load projects from a TOML file.
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let content = std::fs::read_to_string(path)?;
    let projects = parse_projects(&content, path)?;
    tracing::debug!(path = %path.display(), count = projects.len(), "loaded projects");
    Ok(projects)
}
