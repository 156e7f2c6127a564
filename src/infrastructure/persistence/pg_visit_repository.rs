//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use super::{DEFAULT_STORE_TIMEOUT, with_deadline};
use crate::domain::analytics::DailyVisits;
use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// PostgreSQL repository for the visit log.
///
/// Days are bucketed in UTC regardless of the session time zone.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Overrides the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let query = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO visits (link_id, referrer, remote_address)
            VALUES ($1, $2, $3)
            RETURNING id, link_id, created_at, referrer, remote_address
            "#,
        )
        .bind(new_visit.link_id)
        .bind(&new_visit.referrer)
        .bind(&new_visit.remote_address)
        .fetch_one(self.pool.as_ref());

        with_deadline(self.timeout, "visits.record", query).await
    }

    async fn seed(
        &self,
        new_visit: NewVisit,
        created_at: DateTime<Utc>,
    ) -> Result<Visit, AppError> {
        let query = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO visits (link_id, referrer, remote_address, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, created_at, referrer, remote_address
            "#,
        )
        .bind(new_visit.link_id)
        .bind(&new_visit.referrer)
        .bind(&new_visit.remote_address)
        .bind(created_at)
        .fetch_one(self.pool.as_ref());

        with_deadline(self.timeout, "visits.seed", query).await
    }

    async fn count_by_link(&self, link_id: i64) -> Result<i64, AppError> {
        let query = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visits WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref());

        with_deadline(self.timeout, "visits.count_by_link", query).await
    }

    async fn daily_counts(
        &self,
        link_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailyVisits>, AppError> {
        let query = sqlx::query_as::<_, DailyVisits>(
            r#"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS "date",
                   COUNT(*) AS visits
            FROM visits
            WHERE link_id = $1
              AND created_at >= $2
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(link_id)
        .bind(since)
        .fetch_all(self.pool.as_ref());

        with_deadline(self.timeout, "visits.daily_counts", query).await
    }
}
