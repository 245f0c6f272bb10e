//! Utility functions for the usage_forecast crate

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Hourly readings per day
pub const HOURS_PER_DAY: usize = 24;

/// The `horizon` calendar days following `anchor`
pub fn future_dates(anchor: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon as u64)
        .map(|offset| anchor + Days::new(offset))
        .collect()
}

/// `count` hourly timestamps starting at midnight of the day after `anchor`
pub fn future_hours(anchor: NaiveDate, count: usize) -> Vec<NaiveDateTime> {
    let start = (anchor + Days::new(1)).and_time(NaiveTime::MIN);
    (0..count as i64)
        .map(|hour| start + Duration::hours(hour))
        .collect()
}
