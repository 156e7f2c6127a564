//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::time::Duration;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

const DATABASE_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /v1/healthcheck`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: Database unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "available",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "available" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database: db_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity with a trivial query.
async fn check_database(state: &AppState) -> CheckStatus {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(state.db.as_ref());

    match tokio::time::timeout(DATABASE_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => CheckStatus {
            status: "ok".to_string(),
            message: None,
        },
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "health check: database error");
            CheckStatus {
                status: "error".to_string(),
                message: Some("Database error".to_string()),
            }
        }
        Err(_) => CheckStatus {
            status: "error".to_string(),
            message: Some("Database did not answer in time".to_string()),
        },
    }
}
