//! Series sources
//!
//! The engine only needs one collaborator: something that can hand back the
//! historical readings for a date range.

use crate::data::{DataLoader, HistoricalSeries};
use crate::error::Result;
use chrono::NaiveDate;
use std::path::Path;

/// Fetches historical readings for an inclusive date range
pub trait SeriesSource {
    fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<HistoricalSeries>;
}

/// Source backed by a series already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    series: HistoricalSeries,
}

impl InMemorySource {
    pub fn new(series: HistoricalSeries) -> Self {
        Self { series }
    }

    /// Load the whole CSV file up front
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DataLoader::from_csv(path)?))
    }

    pub fn series(&self) -> &HistoricalSeries {
        &self.series
    }
}

impl SeriesSource for InMemorySource {
    fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<HistoricalSeries> {
        Ok(self.series.slice_dates(start, end))
    }
}
