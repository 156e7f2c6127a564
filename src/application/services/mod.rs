//! Business logic services for the application layer.

pub mod analytics_service;
pub mod link_service;
pub mod token_service;
pub mod visit_service;

pub use analytics_service::AnalyticsService;
pub use link_service::LinkService;
pub use token_service::{TokenService, TokenSettings};
pub use visit_service::VisitService;
