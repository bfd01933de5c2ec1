use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index::index_handler))
        .route("/health", get(handlers::health::health_handler))
        .route("/upload", post(handlers::upload::upload_handler))
        .route("/submit", post(handlers::submit::submit_handler))
        .route("/login", post(handlers::login::login_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
