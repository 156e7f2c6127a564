//! Handler for per-link visit analytics.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::api::dto::visits::VisitDataResponse;
use crate::api::handlers::links::link_id;
use crate::error::AppError;
use crate::state::AppState;

/// Returns seven-day visit analytics for a link.
///
/// # Endpoint
///
/// `GET /v1/links/{id}/visits`
///
/// # Response
///
/// The series always holds seven days, oldest first, with zeroes for days
/// without visits.
///
/// ```json
/// {
///   "data": {
///     "total_visits": 300,
///     "seven_day_visits": 300,
///     "visits_per_day": 42.86,
///     "visits": [
///       { "date": "2026-10-12", "visits": 0 },
///       ...
///       { "date": "2026-10-18", "visits": 300 }
///     ]
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn link_visits_handler(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<VisitDataResponse>, AppError> {
    let id = link_id(id)?;
    let data = state.analytics_service.get_link_visits(id).await?;

    Ok(Json(VisitDataResponse { data }))
}
