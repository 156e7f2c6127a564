//! Demo data back-filling, used by the `seeder` binary.
//!
//! Creates one link and spreads visits over the preceding hours, one more visit
//! per hour the further back it goes: `hours = 24` yields 1 + 2 + ... + 24 = 300
//! visits.

use chrono::{DateTime, Duration, Utc};

use crate::application::services::{LinkService, VisitService};
use crate::domain::entities::{Link, NewVisit};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

pub const DEFAULT_NAME: &str = "HeroIcons";
pub const DEFAULT_DESTINATION: &str = "https://heroicons.com/";
pub const DEFAULT_HOURS: u32 = 24;

/// What to seed.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub name: String,
    pub destination: String,
    pub hours: u32,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            hours: DEFAULT_HOURS,
        }
    }
}

impl SeedPlan {
    /// Number of visits the plan produces.
    pub fn visit_count(&self) -> u64 {
        let hours = u64::from(self.hours);
        hours * (hours + 1) / 2
    }
}

#[derive(Debug)]
pub struct SeedReport {
    pub link: Link,
    pub visits: u64,
}

/// Creates the link, then back-fills `i + 1` visits at `now - i` hours for
/// every `i` in `0..hours`.
///
/// # Errors
///
/// Returns the first [`AppError`] raised by link creation or a visit insert;
/// rows written before the failure are kept.
pub async fn seed_link<L, V>(
    link_service: &LinkService<L>,
    visit_service: &VisitService<L, V>,
    plan: &SeedPlan,
    now: DateTime<Utc>,
) -> Result<SeedReport, AppError>
where
    L: LinkRepository,
    V: VisitRepository,
{
    let link = link_service
        .create_link(plan.name.clone(), plan.destination.clone(), None)
        .await?;
    tracing::info!(link_id = link.id, token = %link.token, "seeded link");

    let mut visits = 0;

    for hour in 0..plan.hours {
        let created_at = now - Duration::hours(i64::from(hour));

        for _ in 0..=hour {
            visit_service
                .seed_visit(NewVisit::bare(link.id), created_at)
                .await?;
            visits += 1;
        }

        tracing::debug!(link_id = link.id, hour, count = hour + 1, "seeded hour");
    }

    tracing::info!(link_id = link.id, visits, "seeded visits");

    Ok(SeedReport { link, visits })
}
