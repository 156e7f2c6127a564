//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    link_visits_handler, list_links_handler, new_token_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Versioned API routes, nested under `/v1`.
///
/// # Endpoints
///
/// - `GET    /healthcheck`        - Service and database health
/// - `GET    /links`              - List links (name filter, paging, sorting)
/// - `POST   /links`              - Create a link
/// - `GET    /links/{id}`         - Fetch a link
/// - `PATCH  /links/{id}`         - Partially update a link
/// - `DELETE /links/{id}`         - Delete a link and its visits
/// - `GET    /links/{id}/visits`  - Seven-day visit analytics
/// - `GET    /tokens/new`         - Suggest an unused token
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/healthcheck", get(health_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/{id}/visits", get(link_visits_handler))
        .route("/tokens/new", get(new_token_handler))
}
