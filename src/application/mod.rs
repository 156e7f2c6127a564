//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the seeder.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link lifecycle and listing
//! - [`services::token_service::TokenService`] - Unique token allocation
//! - [`services::visit_service::VisitService`] - Visit ingestion
//! - [`services::analytics_service::AnalyticsService`] - Seven-day visit analytics

pub mod services;
