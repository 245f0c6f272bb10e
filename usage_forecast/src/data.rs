//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Accepted naive timestamp layouts, tried in order after RFC 3339
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Layout used when writing timestamps back out
const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single reading as delivered by the data-access layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar date and time of the reading
    pub timestamp: String,
    /// Signed magnitude; the sign encodes direction (import/export), not size
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

/// A reading with its timestamp parsed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub at: NaiveDateTime,
    pub value: f64,
}

impl Observation {
    /// Create an observation, coercing non-finite values to zero
    pub fn new(at: NaiveDateTime, value: f64) -> Self {
        Self {
            at,
            value: finite_or_zero(value),
        }
    }

    /// Magnitude of the reading
    pub fn abs_value(&self) -> f64 {
        self.value.abs()
    }

    /// Calendar date of the reading
    pub fn date(&self) -> NaiveDate {
        self.at.date()
    }
}

/// Ordered historical readings.
///
/// Timestamps are expected to be strictly increasing. The series may be empty
/// or hold a single reading; every consumer handles both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSeries {
    observations: Vec<Observation>,
}

impl HistoricalSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from wire points.
    ///
    /// Points with an unparseable timestamp are skipped; non-finite values
    /// become zero.
    pub fn from_points(points: &[TimeSeriesPoint]) -> Self {
        let mut observations = Vec::with_capacity(points.len());
        let mut skipped = 0usize;

        for point in points {
            match parse_timestamp(&point.timestamp) {
                Some(at) => observations.push(Observation::new(at, point.value)),
                None => {
                    skipped += 1;
                    warn!(timestamp = %point.timestamp, "Skipping point with unparseable timestamp");
                }
            }
        }

        if skipped > 0 {
            debug!(kept = observations.len(), skipped, "Parsed historical series");
        }

        Self { observations }
    }

    /// Build a series from already-parsed observations
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let observations = observations
            .into_iter()
            .map(|o| Observation::new(o.at, o.value))
            .collect();
        Self { observations }
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the series holds no readings
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All readings in order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Magnitudes of every reading, in order
    pub fn values_abs(&self) -> Vec<f64> {
        self.observations.iter().map(Observation::abs_value).collect()
    }

    /// Mean magnitude over the whole series, or zero when empty
    pub fn mean_abs(&self) -> f64 {
        forecast_math::mean_or_zero(&self.values_abs())
    }

    /// Readings whose calendar date equals `date`
    pub fn points_on(&self, date: NaiveDate) -> impl Iterator<Item = &Observation> + '_ {
        self.observations.iter().filter(move |o| o.date() == date)
    }

    /// Readings whose calendar date lies in `[start, end]`
    pub fn points_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &Observation> + '_ {
        self.observations
            .iter()
            .filter(move |o| o.date() >= start && o.date() <= end)
    }

    /// Mean magnitude of the readings dated in `[start, end]`, if there are any
    pub fn mean_abs_between(&self, start: NaiveDate, end: NaiveDate) -> Option<f64> {
        let values: Vec<f64> = self
            .points_between(start, end)
            .map(Observation::abs_value)
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(forecast_math::mean_or_zero(&values))
        }
    }

    /// Copy of the readings dated in `[start, end]`
    pub fn slice_dates(&self, start: NaiveDate, end: NaiveDate) -> HistoricalSeries {
        Self {
            observations: self.points_between(start, end).copied().collect(),
        }
    }

    /// Convert back to wire points
    pub fn to_points(&self) -> Vec<TimeSeriesPoint> {
        self.observations
            .iter()
            .map(|o| {
                TimeSeriesPoint::new(o.at.format(TIMESTAMP_OUTPUT_FORMAT).to_string(), o.value)
            })
            .collect()
    }
}

impl FromIterator<Observation> for HistoricalSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::from_observations(iter.into_iter().collect())
    }
}

/// Data loader for historical readings
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load readings from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<HistoricalSeries> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load readings from any CSV source with a header row.
    ///
    /// The time column is the first header containing `time` or `date`; the
    /// value column is `value` if present, otherwise the first other column.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<HistoricalSeries> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let (time_idx, value_idx) = Self::detect_columns(&headers)?;

        let mut points = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let (Some(timestamp), Some(raw_value)) = (record.get(time_idx), record.get(value_idx))
            else {
                continue;
            };

            let value = raw_value.parse::<f64>().unwrap_or_else(|_| {
                warn!(value = raw_value, "Non-numeric reading coerced to 0");
                0.0
            });
            points.push(TimeSeriesPoint::new(timestamp, value));
        }

        Ok(HistoricalSeries::from_points(&points))
    }

    /// Load readings from a JSON array of `{timestamp, value}` objects
    pub fn from_json(json: &str) -> Result<HistoricalSeries> {
        let points: Vec<TimeSeriesPoint> = serde_json::from_str(json)?;
        Ok(HistoricalSeries::from_points(&points))
    }

    /// Detect the time and value columns of a CSV header
    fn detect_columns(headers: &csv::StringRecord) -> Result<(usize, usize)> {
        let names: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        let time_idx = names
            .iter()
            .position(|name| name.contains("time") || name.contains("date"))
            .ok_or_else(|| ForecastError::DataError("No time column found in data".to_string()))?;

        let value_idx = names
            .iter()
            .position(|name| name == "value")
            .or_else(|| (0..names.len()).find(|&i| i != time_idx))
            .ok_or_else(|| {
                ForecastError::DataError("No value column found in data".to_string())
            })?;

        Ok((time_idx, value_idx))
    }
}

/// Parse a reading timestamp.
///
/// Accepts RFC 3339 (converted to UTC), naive date-times with `T` or a space
/// separator, and a bare `YYYY-MM-DD` meaning midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Earliest and latest calendar year accepted for an anchor date
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Parse a calendar date, also accepting a full timestamp (its date is used).
///
/// Dates outside years `MIN_YEAR..=MAX_YEAR` are rejected.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date()))
        .ok_or_else(|| ForecastError::InvalidDate(raw.to_string()))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(ForecastError::InvalidDate(format!(
            "{} is outside years {}..={}",
            raw, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(date)
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
