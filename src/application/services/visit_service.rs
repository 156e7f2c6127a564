//! Visit ingestion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewVisit, Visit};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// Records visits against links.
pub struct VisitService<L: LinkRepository, V: VisitRepository> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L: LinkRepository, V: VisitRepository> VisitService<L, V> {
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Appends a visit stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `link_id` is not a valid identity or
    /// does not reference a stored link.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn record_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        ensure_link_id(new_visit.link_id)?;
        self.visit_repository.record(new_visit).await
    }

    /// Resolves `token`, prepares the response with `respond`, then records a
    /// visit to the link.
    ///
    /// No visit is recorded when `respond` fails, so a link that cannot be
    /// served does not accumulate visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the token.
    /// Returns whatever `respond` fails with.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn record_visit_by_token<T, F>(
        &self,
        token: &str,
        referrer: Option<String>,
        remote_address: Option<String>,
        respond: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce(&Link) -> Result<T, AppError> + Send,
        T: Send,
    {
        let link = self
            .link_repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "token": token })))?;

        let response = respond(&link)?;

        let visit = self
            .visit_repository
            .record(NewVisit {
                link_id: link.id,
                referrer,
                remote_address,
            })
            .await?;

        tracing::debug!(link_id = link.id, visit_id = visit.id, "visit recorded");

        Ok(response)
    }

    /// Appends a visit with an explicit timestamp. Used to back-fill data.
    ///
    /// # Errors
    ///
    /// Same as [`Self::record_visit`].
    pub async fn seed_visit(
        &self,
        new_visit: NewVisit,
        created_at: DateTime<Utc>,
    ) -> Result<Visit, AppError> {
        ensure_link_id(new_visit.link_id)?;
        self.visit_repository.seed(new_visit, created_at).await
    }
}

fn ensure_link_id(link_id: i64) -> Result<(), AppError> {
    if link_id <= 0 {
        return Err(AppError::bad_request(
            "Visit must reference a link",
            json!({ "link_id": link_id }),
        ));
    }

    Ok(())
}
