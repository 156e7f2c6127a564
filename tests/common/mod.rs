#![allow(dead_code)]

use chrono::{DateTime, Utc};
use link_shortener::application::services::TokenSettings;
use link_shortener::infrastructure::persistence::DEFAULT_STORE_TIMEOUT;
use link_shortener::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_test_link(pool: &PgPool, name: &str, destination: &str, token: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO links (name, destination, token) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(destination)
    .bind(token)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_visit(pool: &PgPool, link_id: i64, created_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO visits (link_id, created_at) VALUES ($1, $2)")
        .bind(link_id)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_visits(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visits WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        DEFAULT_STORE_TIMEOUT,
        TokenSettings::default(),
    )
}
