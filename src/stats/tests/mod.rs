//! Tests for the statistics engine
//!
//! Streak tests run against [`MemoryArchive`], an in-memory store double
//! keyed by rollup timestamp.


use crate::archive::ArchiveStore;
use crate::error::{DigestError, Result};
use crate::models::{RainRollup, RawReading, TemperatureExtremes, TimeWindow};
use std::collections::{BTreeMap, HashSet};

/// Rollup-only archive double
#[derive(Debug, Default)]
pub struct MemoryArchive {
    pub rollups: BTreeMap<i64, Option<f64>>,
    /// Keys whose lookup fails with a query error
    pub failing: HashSet<i64>,
}

impl MemoryArchive {
    pub fn with_rollup(mut self, midnight: i64, sum: Option<f64>) -> Self {
        self.rollups.insert(midnight, sum);
        self
    }

    pub fn with_failure(mut self, midnight: i64) -> Self {
        self.failing.insert(midnight);
        self
    }
}

impl ArchiveStore for MemoryArchive {
    fn temperature_extremes(&self, _window: &TimeWindow) -> Result<TemperatureExtremes> {
        Ok(TemperatureExtremes::default())
    }

    fn rain_rollup_at(&self, midnight: i64) -> Result<Option<RainRollup>> {
        if self.failing.contains(&midnight) {
            return Err(DigestError::database(
                "simulated failure",
                rusqlite::Error::InvalidQuery,
            ));
        }
        Ok(self.rollups.get(&midnight).map(|sum| RainRollup { sum: *sum }))
    }

    fn rain_rollup_within(&self, window: &TimeWindow) -> Result<Option<RainRollup>> {
        Ok(self
            .rollups
            .range(window.start..window.end)
            .next()
            .map(|(_, sum)| RainRollup { sum: *sum }))
    }

    fn sub_daily_readings(&self, _window: &TimeWindow) -> Result<Vec<RawReading>> {
        Ok(Vec::new())
    }
}
