//! Helpers shared by services and handlers.
//!
//! - [`token_generator`] - Random redirect token generation
//! - [`link_validation`] - Link field validation

pub mod link_validation;
pub mod token_generator;
