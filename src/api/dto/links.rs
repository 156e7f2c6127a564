//! DTOs for link management endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{Link, LinkPatch};
use crate::domain::pagination::Metadata;

/// Compiled regex for caller-chosen tokens.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Request body for `POST /v1/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 500, message = "must be between 1 and 500 bytes"))]
    pub name: String,

    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048))]
    pub destination: String,

    /// Generated when absent.
    #[validate(length(min = 1, max = 32))]
    #[validate(regex(path = "*TOKEN_REGEX", message = "must contain only letters and digits"))]
    pub token: Option<String>,
}

/// Request body for `PATCH /v1/links/{id}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 500, message = "must be between 1 and 500 bytes"))]
    pub name: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048))]
    pub destination: Option<String>,

    #[validate(length(min = 1, max = 32))]
    #[validate(regex(path = "*TOKEN_REGEX", message = "must contain only letters and digits"))]
    pub token: Option<String>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(request: UpdateLinkRequest) -> Self {
        LinkPatch {
            name: request.name,
            destination: request.destination,
            token: request.token,
        }
    }
}

/// `{"link": {...}}` envelope.
#[derive(Debug, Serialize)]
pub struct LinkEnvelope {
    pub link: Link,
}

/// Response for `GET /v1/links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<Link>,
    pub metadata: Metadata,
}
