//! Application error taxonomy and its HTTP mapping.
//!
//! Every fallible operation in the crate returns [`AppError`]. Handlers return it
//! directly; [`IntoResponse`] turns it into a JSON error envelope:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Link not found", "details": { "id": 42 } } }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Postgres constraint guarding token uniqueness (see `migrations/`).
const TOKEN_UNIQUE_CONSTRAINT: &str = "links_token_key";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error description used in response envelopes.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or disallowed input. Raised before any mutation is attempted.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Identity or token does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Optimistic concurrency check failed: the record changed (or vanished)
    /// since the caller read it.
    #[error("{message}")]
    EditConflict { message: String, details: Value },

    /// Unique constraint violation, e.g. a token that is already in use.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Store failure, deadline expiry or token exhaustion. Details stay in the logs.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn edit_conflict(details: Value) -> Self {
        Self::EditConflict {
            message: "Unable to update the record due to an edit conflict, please try again"
                .to_string(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable code and HTTP status for this error kind.
    fn kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::EditConflict { .. } => (StatusCode::CONFLICT, "edit_conflict"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.kind();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::EditConflict { message, details }
            | AppError::Conflict { message, details } => (message.clone(), details.clone()),
            // Internal details never leave the process.
            AppError::Internal { .. } => (
                "The server encountered a problem and could not process your request".to_string(),
                json!({}),
            ),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.kind();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Malformed query string",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

/// Maps a SQLx error to the application taxonomy.
///
/// A violation of the token unique constraint becomes [`AppError::Conflict`],
/// a dangling foreign key becomes [`AppError::Validation`]. Everything else is
/// logged here with full context and becomes an opaque [`AppError::Internal`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        if db.constraint() == Some(TOKEN_UNIQUE_CONSTRAINT) {
            return AppError::conflict(
                "A link with this token already exists",
                json!({ "field": "token" }),
            );
        }

        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    if let Some(db) = e.as_database_error()
        && db.is_foreign_key_violation()
    {
        return AppError::bad_request(
            "Referenced record does not exist",
            json!({ "constraint": db.constraint() }),
        );
    }

    tracing::error!(error = %e, "database error");
    AppError::internal("Database error", json!({}))
}
