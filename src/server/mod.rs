//! JSON proxy in front of the GitHub REST API.
//!
//! Each route performs a single round of GET requests upstream, reshapes the
//! result for the activity page and returns it. Nothing is cached between
//! requests; the page re-polls on its own schedule.

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::github::GithubClient;

pub use error::{ApiError, ApiResult};

pub struct AppState {
    pub client: GithubClient,
}

impl AppState {
    pub fn new(client: GithubClient) -> Arc<Self> {
        Arc::new(Self { client })
    }
}

fn git_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/heatmap", get(handlers::heatmap))
        .route("/commits", get(handlers::commits))
        .route("/commit/{sha}", get(handlers::commit_detail))
        .route("/diff", get(handlers::diff))
        .route("/stats", get(handlers::stats))
        .route("/status", get(handlers::status))
        .route("/tree", get(handlers::tree))
        .route("/check", get(handlers::check))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/git", git_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        repo = ?state.client.config().repo_path().ok(),
        "Activity proxy listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GithubConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn unconfigured() -> Router {
        let client = GithubClient::new(GithubConfig::default()).unwrap();
        router(AppState::new(client))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn diff_requires_file_and_commit() {
        let (status, body) = get_json(unconfigured(), "/api/git/diff?commit=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Filename required");

        let (status, body) = get_json(unconfigured(), "/api/git/diff?file=README.md").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Commit hash required");
    }

    #[tokio::test]
    async fn diff_without_configuration_is_unavailable() {
        let (status, _) = get_json(unconfigured(), "/api/git/diff?file=a.md&commit=abc").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn heatmap_reports_missing_configuration() {
        let (status, body) = get_json(unconfigured(), "/api/git/heatmap").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["days"], serde_json::json!([]));
        assert_eq!(body["error"], "Missing GitHub configuration");
    }

    #[tokio::test]
    async fn tree_reports_missing_configuration() {
        let (status, body) = get_json(unconfigured(), "/api/git/tree").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Missing GitHub configuration");
        assert_eq!(body["totalCommits"], 0);
    }

    #[tokio::test]
    async fn check_reports_config_without_token() {
        let (status, body) = get_json(unconfigured(), "/api/git/check").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["config"]["hasToken"], false);
    }

    #[tokio::test]
    async fn commits_degrade_to_empty_list() {
        let (status, body) = get_json(unconfigured(), "/api/git/commits?days=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["commitsByDate"], serde_json::json!([]));
        assert!(body["error"].is_string());
    }
}
