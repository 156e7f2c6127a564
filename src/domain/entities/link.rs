//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A named redirect from a short token to a destination URL.
///
/// `version` starts at 1 and is bumped by exactly one on every successful
/// update; it is the optimistic concurrency token for [`LinkRepository::update`].
///
/// [`LinkRepository::update`]: crate::domain::repositories::LinkRepository::update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub destination: String,
    pub token: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
    pub version: i32,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        name: String,
        destination: String,
        token: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        version: i32,
    ) -> Self {
        Self {
            id,
            name,
            destination,
            token,
            created_at,
            updated_at,
            version,
        }
    }

    /// Applies the fields present in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: LinkPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(destination) = patch.destination {
            self.destination = destination;
        }
        if let Some(token) = patch.token {
            self.token = token;
        }
    }
}

/// Input data for creating a new link.
///
/// The token has already been resolved (supplied or generated) by the time a
/// `NewLink` reaches the repository.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub name: String,
    pub destination: String,
    pub token: String,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub name: Option<String>,
    pub destination: Option<String>,
    pub token: Option<String>,
}

impl LinkPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.destination.is_none() && self.token.is_none()
    }
}
