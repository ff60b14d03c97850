use crate::error::Result;
use crate::github::GitHubClient;
use crate::models::ProjectSummary;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::info;

/// Strategy requested through configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    /// Pinned items when a token is configured, the full listing otherwise
    Auto,
    Pinned,
    Listing,
}

/// Upstream strategy a deployment runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStrategy {
    Pinned,
    Listing,
}

impl StrategyChoice {
    pub fn resolve(self, token_present: bool) -> FeedStrategy {
        match self {
            StrategyChoice::Auto if token_present => FeedStrategy::Pinned,
            StrategyChoice::Auto => FeedStrategy::Listing,
            StrategyChoice::Pinned => FeedStrategy::Pinned,
            StrategyChoice::Listing => FeedStrategy::Listing,
        }
    }
}

impl fmt::Display for FeedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedStrategy::Pinned => f.write_str("pinned"),
            FeedStrategy::Listing => f.write_str("listing"),
        }
    }
}

/// Fetches one account's repositories with a single upstream call per request
pub struct FeedService {
    client: GitHubClient,
    username: String,
    strategy: FeedStrategy,
}

impl FeedService {
    pub fn new(client: GitHubClient, username: String, choice: StrategyChoice) -> Self {
        let strategy = choice.resolve(client.has_token());
        info!("Repository feed for {} uses the {} strategy", username, strategy);
        Self { client, username, strategy }
    }

    pub fn strategy(&self) -> FeedStrategy {
        self.strategy
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Feed as JSON values, ready to relay to the client.
    pub async fn fetch(&self) -> Result<Vec<Value>> {
        match self.strategy {
            FeedStrategy::Pinned => {
                let projects = self.client.pinned_repositories(&self.username).await?;
                projects
                    .iter()
                    .map(|p| serde_json::to_value(p).map_err(Into::into))
                    .collect()
            }
            FeedStrategy::Listing => self.client.repository_listing(&self.username).await,
        }
    }

    /// Feed decoded into `ProjectSummary` records.
    pub async fn fetch_summaries(&self) -> Result<Vec<ProjectSummary>> {
        match self.strategy {
            FeedStrategy::Pinned => self.client.pinned_repositories(&self.username).await,
            FeedStrategy::Listing => self
                .client
                .repository_listing(&self.username)
                .await?
                .into_iter()
                .map(|repo| serde_json::from_value(repo).map_err(Into::into))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_prefers_pinned_with_token() {
        assert_eq!(StrategyChoice::Auto.resolve(true), FeedStrategy::Pinned);
        assert_eq!(StrategyChoice::Auto.resolve(false), FeedStrategy::Listing);
    }

    #[test]
    fn explicit_choice_ignores_token() {
        assert_eq!(StrategyChoice::Pinned.resolve(false), FeedStrategy::Pinned);
        assert_eq!(StrategyChoice::Listing.resolve(true), FeedStrategy::Listing);
    }
}
