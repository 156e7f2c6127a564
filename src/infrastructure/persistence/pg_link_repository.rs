//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use super::{DEFAULT_STORE_TIMEOUT, with_deadline};
use crate::domain::entities::{Link, NewLink};
use crate::domain::pagination::PageRequest;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link row plus the window-function total of the list query.
#[derive(sqlx::FromRow)]
struct LinkPageRow {
    total_records: i64,
    #[sqlx(flatten)]
    link: Link,
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Updates are conditional writes on `(id, version)`; there is no row locking.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgLinkRepository {
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
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let query = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (name, destination, token)
            VALUES ($1, $2, $3)
            RETURNING id, name, destination, token, created_at, updated_at, version
            "#,
        )
        .bind(&new_link.name)
        .bind(&new_link.destination)
        .bind(&new_link.token)
        .fetch_one(self.pool.as_ref());

        with_deadline(self.timeout, "links.create", query).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let query = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, name, destination, token, created_at, updated_at, version
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref());

        with_deadline(self.timeout, "links.find_by_id", query).await
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, AppError> {
        let query = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, name, destination, token, created_at, updated_at, version
            FROM links
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref());

        with_deadline(self.timeout, "links.find_by_token", query).await
    }

    async fn update(&self, link: &Link) -> Result<Link, AppError> {
        // `updated_at` must move forward even when two writes share a clock tick.
        let query = sqlx::query_as::<_, Link>(
            r#"
            UPDATE links
            SET name = $1,
                destination = $2,
                token = $3,
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond'),
                version = version + 1
            WHERE id = $4 AND version = $5
            RETURNING id, name, destination, token, created_at, updated_at, version
            "#,
        )
        .bind(&link.name)
        .bind(&link.destination)
        .bind(&link.token)
        .bind(link.id)
        .bind(link.version)
        .fetch_optional(self.pool.as_ref());

        match with_deadline(self.timeout, "links.update", query).await? {
            Some(updated) => Ok(updated),
            None => {
                tracing::warn!(
                    link_id = link.id,
                    expected_version = link.version,
                    "conditional update matched no row"
                );
                Err(AppError::edit_conflict(
                    json!({ "id": link.id, "version": link.version }),
                ))
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let query = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref());

        let result = with_deadline(self.timeout, "links.delete", query).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, name: &str, page: &PageRequest) -> Result<(Vec<Link>, i64), AppError> {
        // Column and direction come from the sort allow-list, never from raw input.
        let sql = format!(
            r#"
            SELECT COUNT(*) OVER() AS total_records,
                   id, name, destination, token, created_at, updated_at, version
            FROM links
            WHERE (to_tsvector('simple', name) @@ plainto_tsquery('simple', $1) OR $1 = '')
            ORDER BY {} {}, id ASC
            LIMIT $2 OFFSET $3
            "#,
            page.sort.column,
            page.sort.direction.as_sql()
        );

        let query = sqlx::query_as::<_, LinkPageRow>(&sql)
            .bind(name)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool.as_ref());

        let rows = with_deadline(self.timeout, "links.list", query).await?;

        // The total rides on the returned rows, so a page past the end reports 0.
        let total = rows.first().map(|row| row.total_records).unwrap_or(0);
        let links = rows.into_iter().map(|row| row.link).collect();

        Ok((links, total))
    }
}
