//! HTTP route surface
//!
//! One module per entity; `build_router` merges them, adds the health
//! probe and wires the tracing and CORS layers.

pub mod categories;
pub mod comments;
pub mod posts;
pub mod profiles;
pub mod roles;
pub mod users;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::state::AppState;

/// Assemble the full application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(users::router())
        .merge(posts::router())
        .merge(comments::router())
        .merge(categories::router())
        .merge(profiles::router())
        .merge(roles::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
