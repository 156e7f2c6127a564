//! Per-link visit analytics.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::analytics::{VisitData, summarize, window_start_instant};
use crate::domain::entities::Link;
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// Builds the gap-filled seven-day visit summary for a link.
///
/// Results are computed on every call; nothing is cached.
pub struct AnalyticsService<L: LinkRepository, V: VisitRepository> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L: LinkRepository, V: VisitRepository> AnalyticsService<L, V> {
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Visit data for the window ending today (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_data(&self, link: &Link) -> Result<VisitData, AppError> {
        self.get_data_at(link, Utc::now()).await
    }

    /// Visit data for the window ending on the UTC day of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_data_at(&self, link: &Link, now: DateTime<Utc>) -> Result<VisitData, AppError> {
        let today = now.date_naive();

        let counts = self
            .visit_repository
            .daily_counts(link.id, window_start_instant(today))
            .await?;
        let total_visits = self.visit_repository.count_by_link(link.id).await?;

        Ok(summarize(today, &counts, total_visits))
    }

    /// Looks the link up, then returns its visit data.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_link_visits(&self, link_id: i64) -> Result<VisitData, AppError> {
        let link = self
            .link_repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))?;

        self.get_data(&link).await
    }
}
