//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    AnalyticsService, LinkService, TokenService, TokenSettings, VisitService,
};
use crate::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};

/// Services wired over the PostgreSQL repositories.
///
/// Cloning is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub token_service: Arc<TokenService<PgLinkRepository>>,
    pub visit_service: Arc<VisitService<PgLinkRepository, PgVisitRepository>>,
    pub analytics_service: Arc<AnalyticsService<PgLinkRepository, PgVisitRepository>>,
}

impl AppState {
    /// Builds repositories and services sharing one pool.
    pub fn new(pool: Arc<PgPool>, store_timeout: Duration, token_settings: TokenSettings) -> Self {
        let link_repository =
            Arc::new(PgLinkRepository::new(pool.clone()).with_timeout(store_timeout));
        let visit_repository =
            Arc::new(PgVisitRepository::new(pool.clone()).with_timeout(store_timeout));

        let token_service = Arc::new(TokenService::new(
            link_repository.clone(),
            token_settings,
        ));
        let link_service = Arc::new(LinkService::new(
            link_repository.clone(),
            token_service.clone(),
        ));
        let visit_service = Arc::new(VisitService::new(
            link_repository.clone(),
            visit_repository.clone(),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(link_repository, visit_repository));

        Self {
            db: pool,
            link_service,
            token_service,
            visit_service,
            analytics_service,
        }
    }
}
