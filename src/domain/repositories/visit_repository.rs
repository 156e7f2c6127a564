//! Repository trait for the visit log and its aggregates.

use crate::domain::analytics::DailyVisits;
use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for recording visits and reading visit counts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_visit.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a visit stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Records a visit with a caller-supplied timestamp, for back-filling.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn seed(&self, new_visit: NewVisit, created_at: DateTime<Utc>)
    -> Result<Visit, AppError>;

    /// Counts every visit ever recorded for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_link(&self, link_id: i64) -> Result<i64, AppError>;

    /// Counts visits per UTC calendar day for a link, from `since` onwards.
    ///
    /// Days without visits are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn daily_counts(
        &self,
        link_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailyVisits>, AppError>;
}
