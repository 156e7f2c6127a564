//! Field validation for links.
//!
//! Every field is checked and all problems are reported together, keyed by
//! field name.

use serde_json::{Map, Value, json};
use url::Url;

use crate::error::AppError;

pub const MAX_NAME_BYTES: usize = 500;
pub const MAX_DESTINATION_BYTES: usize = 2048;
pub const MAX_TOKEN_CHARS: usize = 32;

/// Checks a link name. Returns the problem, if any.
pub fn check_name(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("must be provided")
    } else if name.len() > MAX_NAME_BYTES {
        Some("must not be more than 500 bytes long")
    } else {
        None
    }
}

/// Checks a destination URL.
///
/// Only absolute `http` and `https` URLs with a host are accepted.
pub fn check_destination(destination: &str) -> Option<&'static str> {
    if destination.trim().is_empty() {
        return Some("must be provided");
    }
    if destination.len() > MAX_DESTINATION_BYTES {
        return Some("must not be more than 2048 bytes long");
    }

    match Url::parse(destination) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => None,
        Ok(_) => Some("must be an http or https URL"),
        Err(_) => Some("must be a valid URL"),
    }
}

/// Serialized form of a destination, as stored and sent in `Location`.
///
/// The URL parser silently drops ASCII tabs and newlines and percent-encodes
/// everything outside ASCII, so the result is always a valid header value even
/// when the raw input is not.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the destination fails [`check_destination`].
pub fn canonical_destination(destination: &str) -> Result<String, AppError> {
    let invalid = |problem: &str| {
        AppError::bad_request("Invalid link", json!({ "destination": problem }))
    };

    if let Some(problem) = check_destination(destination) {
        return Err(invalid(problem));
    }

    Url::parse(destination)
        .map(String::from)
        .map_err(|_| invalid("must be a valid URL"))
}

/// Checks a redirect token.
pub fn check_token(token: &str) -> Option<&'static str> {
    if token.is_empty() {
        Some("must be provided")
    } else if token.chars().count() > MAX_TOKEN_CHARS {
        Some("must not be more than 32 characters long")
    } else if !is_valid_token(token) {
        Some("must contain only letters and digits")
    } else {
        None
    }
}

/// Whether `token` is usable as a single URL path segment.
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validates all link fields at once.
///
/// A `None` token is skipped; it will be generated later.
///
/// # Errors
///
/// Returns [`AppError::Validation`] whose details map each offending field to
/// its problem.
pub fn validate_link(
    name: &str,
    destination: &str,
    token: Option<&str>,
) -> Result<(), AppError> {
    let mut problems = Map::new();

    if let Some(problem) = check_name(name) {
        problems.insert("name".into(), json!(problem));
    }
    if let Some(problem) = check_destination(destination) {
        problems.insert("destination".into(), json!(problem));
    }
    if let Some(problem) = token.and_then(check_token) {
        problems.insert("token".into(), json!(problem));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::bad_request("Invalid link", Value::Object(problems)))
    }
}
