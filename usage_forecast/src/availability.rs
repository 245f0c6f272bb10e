//! Data availability assessment
//!
//! Scans a historical series for gaps and checks how well it covers the
//! reference windows each forecasting tier depends on.

use crate::config::AvailabilityConfig;
use crate::data::HistoricalSeries;
use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Days of hourly points that count as a multi-year cycle
pub const MULTI_YEAR_DAYS: usize = 730;
/// Share of expected hourly points a reference window must hold
pub const WINDOW_COVERAGE_THRESHOLD: f64 = 0.5;
/// Length of the long trailing window
pub const RECENT_LONG_DAYS: u32 = 30;
/// Length of the short trailing window
pub const RECENT_SHORT_DAYS: u32 = 7;
/// Spacing beyond which two consecutive readings delimit a missing period
pub const GAP_THRESHOLD_HOURS: f64 = 24.0;
/// Missing periods reported, in the order they are found
pub const MAX_MISSING_PERIODS: usize = 5;

const HOURS_PER_DAY: f64 = 24.0;

/// A stretch between two consecutive readings longer than the gap threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub length_days: u32,
}

/// Completeness of a series
#[derive(Debug, Clone, PartialEq)]
pub struct GapReport {
    /// Percentage of expected hourly readings present, 0 to 100
    pub completeness_score: u8,
    pub missing_periods: Vec<MissingPeriod>,
}

/// What history is available around an anchor date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAvailability {
    pub has_multi_year_cycle: bool,
    pub has_last_year_window: bool,
    #[serde(rename = "hasRecent30Days")]
    pub has_recent_30_days: bool,
    #[serde(rename = "hasRecent7Days")]
    pub has_recent_7_days: bool,
    pub completeness_score: u8,
    pub missing_periods: Vec<MissingPeriod>,
    pub total_points: usize,
}

/// Gap analysis with the default threshold and cap
pub fn analyze_gaps(series: &HistoricalSeries) -> GapReport {
    analyze_gaps_with(series, GAP_THRESHOLD_HOURS, MAX_MISSING_PERIODS)
}

/// Gap analysis assuming nominal hourly spacing.
///
/// Only the first `max_periods` gaps in chronological order are kept, not the
/// largest ones.
pub fn analyze_gaps_with(
    series: &HistoricalSeries,
    gap_threshold_hours: f64,
    max_periods: usize,
) -> GapReport {
    let observations = series.observations();
    // Nothing to be incomplete against
    if observations.len() < 2 {
        return GapReport {
            completeness_score: 100,
            missing_periods: Vec::new(),
        };
    }

    let first = observations[0].at;
    let last = observations[observations.len() - 1].at;
    let expected = hours_between(first, last).floor();
    let completeness_score = if expected <= 0.0 {
        100
    } else {
        (observations.len() as f64 / expected * 100.0)
            .min(100.0)
            .round() as u8
    };

    let missing_periods = observations
        .windows(2)
        .filter_map(|pair| {
            let gap_hours = hours_between(pair[0].at, pair[1].at);
            (gap_hours > gap_threshold_hours).then(|| MissingPeriod {
                start: pair[0].at,
                end: pair[1].at,
                length_days: (gap_hours / HOURS_PER_DAY).floor() as u32,
            })
        })
        .take(max_periods)
        .collect();

    GapReport {
        completeness_score,
        missing_periods,
    }
}

/// Assess availability with the default thresholds
pub fn assess_availability(
    anchor: NaiveDate,
    series: &HistoricalSeries,
    horizon_days: usize,
) -> DataAvailability {
    assess_availability_with(anchor, series, horizon_days, &AvailabilityConfig::default())
}

/// Evaluate the reference windows around `anchor` against `series`.
///
/// The multi-year flag is a point-count proxy: it does not verify that the
/// points actually span two calendar years.
pub fn assess_availability_with(
    anchor: NaiveDate,
    series: &HistoricalSeries,
    horizon_days: usize,
    config: &AvailabilityConfig,
) -> DataAvailability {
    let total_points = series.len();
    let has_multi_year_cycle = total_points >= config.multi_year_days * 24;

    let last_year_start = one_year_before(anchor);
    let last_year_end = last_year_start + Days::new(horizon_days as u64);
    let has_last_year_window =
        window_available(series, last_year_start, last_year_end, config.window_coverage);

    let has_recent_30_days = window_available(
        series,
        anchor - Days::new(u64::from(config.recent_long_days)),
        anchor,
        config.window_coverage,
    );
    let has_recent_7_days = window_available(
        series,
        anchor - Days::new(u64::from(config.recent_short_days)),
        anchor,
        config.window_coverage,
    );

    let gaps = analyze_gaps_with(series, config.gap_threshold_hours, config.max_missing_periods);

    debug!(
        %anchor,
        total_points,
        has_multi_year_cycle,
        has_last_year_window,
        has_recent_30_days,
        has_recent_7_days,
        completeness = gaps.completeness_score,
        missing_periods = gaps.missing_periods.len(),
        "Assessed data availability"
    );

    DataAvailability {
        has_multi_year_cycle,
        has_last_year_window,
        has_recent_30_days,
        has_recent_7_days,
        completeness_score: gaps.completeness_score,
        missing_periods: gaps.missing_periods,
        total_points,
    }
}

/// Same calendar date one year earlier; 29 February maps to 28 February
pub(crate) fn one_year_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(12))
        .unwrap_or_else(|| date - Days::new(365))
}

fn window_available(
    series: &HistoricalSeries,
    start: NaiveDate,
    end: NaiveDate,
    coverage: f64,
) -> bool {
    let days = (end - start).num_days();
    if days <= 0 {
        return false;
    }

    let expected = days as f64 * HOURS_PER_DAY;
    let present = series.points_between(start, end).count();
    present as f64 >= coverage * expected
}

fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
