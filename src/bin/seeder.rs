//! Seeds a demo link with a day of back-filled visits.
//!
//! # Usage
//!
//! ```bash
//! # HeroIcons link with 300 visits over the past 24 hours
//! cargo run --bin seeder
//!
//! # Custom link and window
//! cargo run --bin seeder -- --name "Docs" --destination https://docs.rs/ --hours 6
//! ```
//!
//! # Environment Variables
//!
//! Database settings are read exactly like the server does (`DATABASE_URL` or
//! `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`). Migrations must
//! already be applied.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use link_shortener::config::load_from_env;
use link_shortener::seed::{DEFAULT_DESTINATION, DEFAULT_HOURS, DEFAULT_NAME, SeedPlan, seed_link};
use link_shortener::state::AppState;

/// Back-fills a link and its visit history for local development.
#[derive(Parser)]
#[command(name = "seeder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Link name
    #[arg(long, default_value = DEFAULT_NAME)]
    name: String,

    /// Redirect destination (http or https)
    #[arg(long, default_value = DEFAULT_DESTINATION)]
    destination: String,

    /// Hours to back-fill; hour i (counting back from now) gets i + 1 visits
    #[arg(long, default_value_t = DEFAULT_HOURS, value_parser = clap::value_parser!(u32).range(0..=168))]
    hours: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let state = AppState::new(
        Arc::new(pool),
        config.store_timeout(),
        config.token_settings(),
    );

    let plan = SeedPlan {
        name: cli.name,
        destination: cli.destination,
        hours: cli.hours,
    };

    tracing::info!(
        name = %plan.name,
        hours = plan.hours,
        visits = plan.visit_count(),
        "seeding database"
    );

    let report = seed_link(
        state.link_service.as_ref(),
        state.visit_service.as_ref(),
        &plan,
        Utc::now(),
    )
    .await
    .context("Failed to seed database")?;

    println!(
        "Created link {} ({}) -> {} with {} visits",
        report.link.id, report.link.token, report.link.destination, report.visits
    );

    Ok(())
}
