use crate::error::FeedError;
use crate::feed::{FeedService, FeedStrategy};
use crate::headers::no_store_headers;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Path the portfolio client requests its projects from
pub const FEED_PATH: &str = "/api/github-repos";

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub strategy: FeedStrategy,
    pub username: String,
}

/// Application state shared by the handlers
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedService>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(feed: FeedService) -> Self {
        Self {
            feed: Arc::new(feed),
            start_time: Instant::now(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(FEED_PATH, get(github_repos))
        .route("/health", get(health_check))
        .route("/livez", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router until Ctrl+C
pub async fn start_server(state: AppState, port: u16) -> Result<(), FeedError> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Repository feed listening on http://{}{}", addr, FEED_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn github_repos(State(state): State<AppState>) -> Response {
    match state.feed.fetch().await {
        Ok(projects) => {
            debug!("Serving {} projects", projects.len());
            (StatusCode::OK, no_store_headers(), Json(projects)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        strategy: state.feed.strategy(),
        username: state.feed.username().to_string(),
    })
}
