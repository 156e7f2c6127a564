//! DTOs for analytics and token endpoints.

use serde::Serialize;

use crate::domain::analytics::VisitData;

/// Response for `GET /v1/links/{id}/visits`.
#[derive(Debug, Serialize)]
pub struct VisitDataResponse {
    pub data: VisitData,
}

/// Response for `GET /v1/tokens/new`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
