//! Handler for token redirects.

use axum::{
    Extension,
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a token to its link's destination.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Request Flow
///
/// 1. Resolve the token
/// 2. Build the `Location` header from the destination
/// 3. Record a visit with the `Referer` header and the peer address
/// 4. Return 301 Moved Permanently
///
/// No visit is recorded if the destination cannot be sent; a failed visit
/// write fails the request.
///
/// # Errors
///
/// Returns 404 Not Found if no link uses the token.
/// Returns 500 Internal Server Error if the stored destination is not a valid
/// header value.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<Extension<ConnectInfo<SocketAddr>>>,
) -> Result<impl IntoResponse, AppError> {
    let referrer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let remote_address =
        connect_info.map(|Extension(ConnectInfo(addr))| addr.ip().to_string());

    let location = state
        .visit_service
        .record_visit_by_token(&token, referrer, remote_address, location_for)
        .await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}

/// Builds the `Location` header for a link's destination.
fn location_for(link: &Link) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&link.destination).map_err(|e| {
        tracing::error!(link_id = link.id, error = %e, "stored destination is not a valid header");
        AppError::internal("Invalid destination", json!({ "link_id": link.id }))
    })
}
