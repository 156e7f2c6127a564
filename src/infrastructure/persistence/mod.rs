//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Every store
//! call runs under a deadline (see [`with_deadline`]) so an unreachable database
//! fails the request quickly instead of hanging it.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage with optimistic concurrency
//! - [`PgVisitRepository`] - Visit log and per-day aggregates

pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Deadline applied to a single store call unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs `query` with a deadline, mapping both SQLx errors and expiry to [`AppError`].
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the deadline passes, otherwise whatever
/// [`crate::error::map_sqlx_error`] makes of the failure.
pub(crate) async fn with_deadline<T, F>(
    deadline: Duration,
    operation: &'static str,
    query: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(deadline, query).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => {
            tracing::error!(
                operation,
                timeout_ms = deadline.as_millis() as u64,
                "store call exceeded its deadline"
            );
            Err(AppError::internal(
                "Store deadline exceeded",
                json!({ "operation": operation }),
            ))
        }
    }
}
