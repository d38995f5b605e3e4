use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use common::types::Health;
use service::PostRepository;

pub mod api;
pub mod posts;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    match service::metrics::encode_metrics() {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}")),
    }
}

/// Build the full application router: HTML pages, JSON API, health and metrics.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(posts::index))
        .route("/add", get(posts::add_form).post(posts::add_post))
        .route("/update/:id", get(posts::update_form).post(posts::update_post))
        .route("/delete/:id", post(posts::delete_post));

    let api = Router::new()
        .route("/api/posts", get(api::list_posts))
        .route("/api/posts/:id", get(api::get_post));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(pages)
        .merge(api)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
