//! Domain layer containing business entities and logic.
//!
//! This module defines entities, repository interfaces, and the pure parts of the
//! business rules, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`pagination`] - Sort allow-listing, paging bounds and list metadata
//! - [`analytics`] - Gap-filled daily visit series and summary statistics
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod analytics;
pub mod entities;
pub mod pagination;
pub mod repositories;
