//! Handler for token suggestions.

use axum::{Json, extract::State};

use crate::api::dto::visits::TokenResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Suggests a token that no stored link uses yet.
///
/// # Endpoint
///
/// `GET /v1/tokens/new`
///
/// The token is not reserved; a later create may still lose a race for it.
///
/// # Errors
///
/// Returns 500 Internal Server Error if no free token was found within the
/// configured number of attempts.
pub async fn new_token_handler(
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.token_service.generate_unique_token().await?;

    Ok(Json(TokenResponse { token }))
}
