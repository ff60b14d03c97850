use crate::error::{FeedError, Result};
use crate::models::ProjectSummary;
use crate::types::{GraphQlResponse, PinnedItemsData};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
/// Page size of the pinned-items query
pub const PINNED_LIMIT: usize = 6;
/// Page size of the repository listing
pub const LISTING_LIMIT: usize = 100;

/// Builds the GraphQL query for a user's pinned repositories.
pub fn pinned_items_query(username: &str) -> String {
    // serde_json quotes and escapes the login as a GraphQL string literal
    let login = Value::String(username.to_string());
    format!(
        r#"query {{
  user(login: {login}) {{
    pinnedItems(first: {limit}, types: [REPOSITORY]) {{
      nodes {{
        ... on Repository {{
          id
          name
          description
          url
          homepageUrl
          languages(first: 1) {{
            nodes {{
              name
            }}
          }}
          stargazerCount
          forkCount
          updatedAt
        }}
      }}
    }}
  }}
}}"#,
        login = login,
        limit = PINNED_LIMIT,
    )
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(FeedError::InvalidBaseUrl(format!(
                "{} cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent("Portfolio Feed/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;

        // A blank token is the same as no token
        let token = token.filter(|t| !t.trim().is_empty());

        Ok(GitHubClient { client, base_url, token })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FeedError::InvalidBaseUrl(format!("{} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch up to six pinned repositories through the GraphQL API.
    ///
    /// Requires a token; without one this fails before any request is sent.
    pub async fn pinned_repositories(&self, username: &str) -> Result<Vec<ProjectSummary>> {
        let token = self.token.as_deref().ok_or(FeedError::MissingToken)?;
        let url = self.endpoint(&["graphql"])?;

        debug!("Querying pinned repositories for {} at {}", username, url);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .bearer_auth(token)
            .json(&json!({ "query": pinned_items_query(username) }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<GraphQlResponse<PinnedItemsData>>(&body) {
            // A structured error takes precedence over the transport status
            Ok(GraphQlResponse { errors: Some(errors), .. }) if !errors.is_empty() => {
                let message = errors
                    .into_iter()
                    .next()
                    .map(|e| e.message)
                    .unwrap_or_default();
                Err(FeedError::Query(message))
            }
            _ if !status.is_success() => Err(FeedError::UpstreamStatus {
                status: status.as_u16(),
                message: "Failed to fetch pinned repositories".to_string(),
            }),
            Ok(GraphQlResponse { data, .. }) => {
                let user = data.and_then(|d| d.user).ok_or_else(|| {
                    FeedError::MalformedResponse(format!(
                        "No user data returned for {}",
                        username
                    ))
                })?;

                Ok(user
                    .pinned_items
                    .nodes
                    .into_iter()
                    .take(PINNED_LIMIT)
                    .map(ProjectSummary::from)
                    .collect())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List up to 100 repositories sorted by most recent update.
    ///
    /// Elements are relayed exactly as the REST API returned them.
    pub async fn repository_listing(&self, username: &str) -> Result<Vec<Value>> {
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &LISTING_LIMIT.to_string());

        debug!("Listing repositories for {} at {}", username, url);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github.v3+json")
            // Upstream reuse up to an hour keeps us within rate limits
            .header(CACHE_CONTROL, "max-age=3600");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let mut repos = Self::ok_json::<Vec<Value>>(response).await?;
        repos.truncate(LISTING_LIMIT);

        Ok(repos)
    }

    async fn ok_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                status: status.as_u16(),
                message: "Failed to fetch repositories".to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
