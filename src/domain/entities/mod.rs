//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A named, versioned redirect token
//! - [`Visit`] - One recorded redirect through a link
//!
//! # Design Pattern
//!
//! Entities have separate structs for creation and mutation:
//! - `NewLink`, `NewVisit` - For creating new records
//! - `LinkPatch` - For partial updates

pub mod link;
pub mod visit;

pub use link::{Link, LinkPatch, NewLink};
pub use visit::{NewVisit, Visit};
