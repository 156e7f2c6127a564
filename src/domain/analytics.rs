//! Gap-filled daily visit series and summary statistics.
//!
//! The bucket set is always built from the calendar, never from query results:
//! a day without visits must show up as a zero rather than disappear.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Number of calendar days in the trailing window, today included.
pub const WINDOW_DAYS: i64 = 7;

/// Visit count for one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DailyVisits {
    pub date: NaiveDate,
    pub visits: i64,
}

/// Visit analytics for one link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitData {
    pub total_visits: i64,
    pub seven_day_visits: i64,
    pub visits_per_day: f64,
    #[serde(rename = "visits")]
    pub series: Vec<DailyVisits>,
}

/// First calendar day of the window ending on `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(WINDOW_DAYS - 1)
}

/// Midnight UTC of the first day of the window ending on `today`.
pub fn window_start_instant(today: NaiveDate) -> DateTime<Utc> {
    window_start(today).and_time(NaiveTime::MIN).and_utc()
}

/// Overlays `counts` onto seven zeroed buckets ending on `today`.
///
/// Dates outside the window are ignored. The result is ascending by date and
/// always has exactly [`WINDOW_DAYS`] entries.
pub fn gap_filled_series(today: NaiveDate, counts: &[DailyVisits]) -> Vec<DailyVisits> {
    let mut buckets: BTreeMap<NaiveDate, i64> = (0..WINDOW_DAYS)
        .map(|offset| (today - Duration::days(offset), 0))
        .collect();

    for count in counts {
        if let Some(bucket) = buckets.get_mut(&count.date) {
            *bucket = count.visits;
        }
    }

    buckets
        .into_iter()
        .map(|(date, visits)| DailyVisits { date, visits })
        .collect()
}

/// Average visits per day over the window, rounded half-up to two decimals.
///
/// Rounding happens on integer hundredths so no float truncation sneaks in.
pub fn visits_per_day(seven_day_visits: i64) -> f64 {
    let hundredths = (seven_day_visits * 200 + WINDOW_DAYS) / (WINDOW_DAYS * 2);
    hundredths as f64 / 100.0
}

/// Builds the full [`VisitData`] from per-day counts and the all-time total.
pub fn summarize(today: NaiveDate, counts: &[DailyVisits], total_visits: i64) -> VisitData {
    let series = gap_filled_series(today, counts);
    let seven_day_visits = series.iter().map(|day| day.visits).sum();

    VisitData {
        total_visits,
        seven_day_visits,
        visits_per_day: visits_per_day(seven_day_visits),
        series,
    }
}
