//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{token}`  - Token redirect, records a visit
//! - `/v1/*`          - JSON API (see [`crate::api::routes::v1_routes`])
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/{token}", get(redirect_handler))
        .nest("/v1", api::routes::v1_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn not_found_handler() -> AppError {
    AppError::not_found("The requested resource could not be found", json!({}))
}
