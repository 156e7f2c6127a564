//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::pagination::PageRequest;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with version 1.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its redirect token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, AppError>;

    /// Writes `link` if and only if the stored row still has `link.id` and
    /// `link.version`.
    ///
    /// On success the stored version is `link.version + 1` and `updated_at` has
    /// moved forward; the fresh row is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EditConflict`] if no row matched (missing or stale).
    /// Returns [`AppError::Conflict`] if the new token is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, link: &Link) -> Result<Link, AppError>;

    /// Deletes a link and, through the foreign key, its visits.
    ///
    /// Returns `Ok(false)` if no link had this ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists links whose name matches `name` (empty matches everything).
    ///
    /// Returns the requested page and the total number of matching links,
    /// computed in the same query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, name: &str, page: &PageRequest) -> Result<(Vec<Link>, i64), AppError>;
}
