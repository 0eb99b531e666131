//! REST API.
//!
//! Thin adapter over [`Database`]: handlers parse the request, call one
//! repository operation and shape the response. Error-to-status mapping lives
//! in [`error`].

pub mod error;
pub mod projects;
pub mod tasks;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use taskboard_core::Database;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

pub fn create_router(db: Database) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get_by_id)
                .patch(projects::update)
                .delete(projects::delete),
        )
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/tasks/{id}",
            get(tasks::get_by_id)
                .patch(tasks::update)
                .delete(tasks::delete),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Any origin may call the API.
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
