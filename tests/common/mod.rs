#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use portfolio_feed::feed::{FeedService, StrategyChoice};
use portfolio_feed::github::GitHubClient;
use portfolio_feed::server::{create_router, AppState, FEED_PATH};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use url::Url;

/// A request the fake upstream received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: String,
}

/// Body the fake upstream answers with
#[derive(Debug, Clone)]
pub enum Canned {
    Json(Value),
    Text(String),
}

struct FakeState {
    status: StatusCode,
    body: Canned,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Stand-in for the GitHub API answering every request with one canned response
pub struct FakeGitHub {
    pub base_url: Url,
    state: Arc<FakeState>,
}

impl FakeGitHub {
    pub async fn start(status: StatusCode, body: Value) -> anyhow::Result<Self> {
        Self::start_with(status, Canned::Json(body)).await
    }

    /// Answers with a non-JSON body, e.g. a proxy's HTML error page
    pub async fn start_text(status: StatusCode, body: &str) -> anyhow::Result<Self> {
        Self::start_with(status, Canned::Text(body.to_string())).await
    }

    async fn start_with(status: StatusCode, body: Canned) -> anyhow::Result<Self> {
        let state = Arc::new(FakeState {
            status,
            body,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(respond).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(FakeGitHub {
            base_url: Url::parse(&format!("http://{}", addr))?,
            state,
        })
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn client(&self, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(self.base_url.clone(), token.map(str::to_string))
            .expect("Failed to create client")
    }

    pub fn feed(&self, token: Option<&str>, choice: StrategyChoice) -> FeedService {
        FeedService::new(self.client(token), "octocat".to_string(), choice)
    }
}

async fn respond(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        uri,
        headers,
        body,
    });

    match &state.body {
        Canned::Json(body) => (state.status, Json(body.clone())).into_response(),
        Canned::Text(body) => (state.status, body.clone()).into_response(),
    }
}

/// Sends `GET /api/github-repos` through the router and returns status, headers and JSON body
pub async fn get_feed(feed: FeedService) -> (StatusCode, HeaderMap, Value) {
    let router = create_router(AppState::new(feed));
    let response = router
        .oneshot(Request::get(FEED_PATH).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();

    (status, headers, body)
}

pub fn pinned_node(index: usize, languages: &[&str]) -> Value {
    json!({
        "id": format!("R_kgDO{}", index),
        "name": format!("project-{}", index),
        "description": format!("Pinned project {}", index),
        "url": format!("https://github.com/octocat/project-{}", index),
        "homepageUrl": null,
        "languages": {
            "nodes": languages.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>()
        },
        "stargazerCount": index * 10,
        "forkCount": index,
        "updatedAt": format!("2024-03-{:02}T10:00:00Z", index + 1)
    })
}

pub fn pinned_body(nodes: Vec<Value>) -> Value {
    json!({
        "data": {
            "user": {
                "pinnedItems": { "nodes": nodes }
            }
        }
    })
}

pub fn rest_repo(id: u64, fork: bool) -> Value {
    json!({
        "id": id,
        "node_id": format!("MDEwOlJlcG9zaXRvcnk{}", id),
        "name": format!("repo-{}", id),
        "full_name": format!("octocat/repo-{}", id),
        "description": null,
        "html_url": format!("https://github.com/octocat/repo-{}", id),
        "homepage": "",
        "language": "Rust",
        "stargazers_count": id,
        "forks_count": 0,
        "updated_at": "2024-02-01T08:30:00Z",
        "fork": fork,
        "private": false
    })
}
