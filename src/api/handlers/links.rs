//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkEnvelope, LinkListResponse, UpdateLinkRequest};
use crate::api::dto::pagination::ListLinksQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Optional optimistic concurrency precondition for `PATCH`.
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

/// Creates a link.
///
/// # Endpoint
///
/// `POST /v1/links`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "HeroIcons",
///   "destination": "https://heroicons.com/",
///   "token": "icons"   // optional, generated when absent
/// }
/// ```
///
/// # Response
///
/// 201 Created with `Location: /v1/links/{id}` and `{"link": {...}}`.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the token is already in use.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.name, payload.destination, payload.token)
        .await?;

    let location = HeaderValue::from_str(&format!("/v1/links/{}", link.id)).map_err(|e| {
        AppError::internal("Invalid location header", json!({ "reason": e.to_string() }))
    })?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(LinkEnvelope { link }),
    ))
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /v1/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn get_link_handler(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<LinkEnvelope>, AppError> {
    let id = link_id(id)?;
    let link = state.link_service.get_link(id).await?;

    Ok(Json(LinkEnvelope { link }))
}

/// Lists links, optionally filtered by a full-text name query.
///
/// # Endpoint
///
/// `GET /v1/links?name=hero&page=1&page_size=20&sort=-created_at`
///
/// # Response
///
/// ```json
/// {
///   "links": [ ... ],
///   "metadata": {
///     "current_page": 1,
///     "page_size": 20,
///     "first_page": 1,
///     "last_page": 5,
///     "total_records": 95
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for out-of-range paging or an unknown sort key.
pub async fn list_links_handler(
    State(state): State<AppState>,
    query: Result<Query<ListLinksQuery>, QueryRejection>,
) -> Result<Json<LinkListResponse>, AppError> {
    let Query(query) = query?;

    let (links, metadata) = state
        .link_service
        .list_links(query.name(), &query.filters())
        .await?;

    Ok(Json(LinkListResponse { links, metadata }))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PATCH /v1/links/{id}`
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// ```json
/// { "destination": "https://heroicons.com/v2" }
/// ```
///
/// Sending `X-Expected-Version: 3` makes the update fail unless the stored
/// version is still 3.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails or the version header is not a number.
/// Returns 404 Not Found if the link doesn't exist.
/// Returns 409 Conflict (`edit_conflict`) if the link was modified concurrently.
/// Returns 409 Conflict (`conflict`) if the new token is already in use.
pub async fn update_link_handler(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UpdateLinkRequest>, JsonRejection>,
) -> Result<Json<LinkEnvelope>, AppError> {
    let id = link_id(id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    let expected_version = expected_version(&headers)?;

    let link = state
        .link_service
        .update_link(id, payload.into(), expected_version)
        .await?;

    Ok(Json(LinkEnvelope { link }))
}

/// Deletes a link and its visits.
///
/// # Endpoint
///
/// `DELETE /v1/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = link_id(id)?;
    state.link_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Extracts a link ID from the path. Anything that is not a positive integer
/// cannot name a link and is reported as not found.
pub(crate) fn link_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    match path {
        Ok(Path(id)) if id >= 1 => Ok(id),
        _ => Err(AppError::not_found(
            "The requested resource could not be found",
            json!({}),
        )),
    }
}

fn expected_version(headers: &HeaderMap) -> Result<Option<i32>, AppError> {
    let Some(value) = headers.get(EXPECTED_VERSION_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .filter(|version| *version >= 1)
        .map(Some)
        .ok_or_else(|| {
            AppError::bad_request(
                "Invalid X-Expected-Version header",
                json!({ "header": EXPECTED_VERSION_HEADER, "expected": "positive integer" }),
            )
        })
}
