use anyhow::{Result, anyhow};
use std::str::FromStr;

use crate::catalog::GITHUB_URL_PREFIX;

/// Owner and repository name extracted from a full GitHub URL.
#[derive(Debug, PartialEq, Clone)]
pub struct GitHubUrl {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for GitHubUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for GitHubUrl {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(GITHUB_URL_PREFIX)
            .ok_or_else(|| anyhow!("Invalid GitHub URL format"))?;
        let mut segments = rest.split('/');
        let owner = segments.next().unwrap_or_default();
        let name = segments.next().unwrap_or_default();
        if owner.is_empty() || name.is_empty() {
            return Err(anyhow!("Invalid GitHub URL format"));
        }
        Ok(GitHubUrl {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl GitHubUrl {
    /// Derives the catalog identifier: lowercased owner and name joined by a
    /// dash, with dots in the name folded to underscores so the result stays
    /// a valid slug.
    pub fn catalog_id(&self) -> String {
        format!(
            "{}-{}",
            self.owner.to_lowercase(),
            self.name.to_lowercase().replace('.', "_")
        )
    }
}

/// Keeps only URLs on the GitHub host; order is preserved.
pub fn filter_github_urls(urls: &[String]) -> Vec<String> {
    urls.iter()
        .filter(|url| url.starts_with(GITHUB_URL_PREFIX))
        .cloned()
        .collect()
}
