//! Visit entity representing a single redirect through a link.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A recorded visit. Visits form an append-only log and are never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub remote_address: Option<String>,
}

impl Visit {
    /// Creates a new Visit instance.
    pub fn new(
        id: i64,
        link_id: i64,
        created_at: DateTime<Utc>,
        referrer: Option<String>,
        remote_address: Option<String>,
    ) -> Self {
        Self {
            id,
            link_id,
            created_at,
            referrer,
            remote_address,
        }
    }
}

/// Input data for recording a visit.
///
/// `link_id` must reference an existing link. The timestamp is assigned by the
/// store, except for back-filled visits (see
/// [`VisitRepository::seed`](crate::domain::repositories::VisitRepository::seed)).
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub link_id: i64,
    pub referrer: Option<String>,
    pub remote_address: Option<String>,
}

impl NewVisit {
    /// Visit without referrer or origin address.
    pub fn bare(link_id: i64) -> Self {
        Self {
            link_id,
            referrer: None,
            remote_address: None,
        }
    }
}
