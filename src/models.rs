use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::PinnedRepository;

/// Upstream identifier: GraphQL node ids are strings, REST ids are integers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(u64),
    Node(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Number(id) => write!(f, "{}", id),
            ProjectId::Node(id) => f.write_str(id),
        }
    }
}

/// Normalized repository record returned to the portfolio client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
    pub fork: bool,
}

impl From<PinnedRepository> for ProjectSummary {
    fn from(repo: PinnedRepository) -> Self {
        // Only the first language is requested; an empty name counts as none
        let language = repo
            .languages
            .nodes
            .into_iter()
            .next()
            .map(|node| node.name)
            .filter(|name| !name.is_empty());

        ProjectSummary {
            id: ProjectId::Node(repo.id),
            name: repo.name,
            description: repo.description,
            html_url: repo.url,
            homepage: repo.homepage_url,
            language,
            stargazers_count: repo.stargazer_count,
            forks_count: repo.fork_count,
            updated_at: repo.updated_at,
            // Pinned items never include forks
            fork: false,
        }
    }
}
