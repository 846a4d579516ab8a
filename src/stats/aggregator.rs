//! Per-day aggregation of archive readings.

use crate::archive::{ArchiveStore, read_day};
use crate::config::ReportSettings;
use crate::error::Result;
use crate::models::{DayReadings, DayStats, RawReading, TimeWindow};
use chrono::{DateTime, TimeZone, Timelike};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Read one window from the store and aggregate it
pub fn aggregate_day<S, Tz>(
    store: &S,
    window: &TimeWindow,
    tz: &Tz,
    settings: &ReportSettings,
) -> Result<DayStats>
where
    S: ArchiveStore + ?Sized,
    Tz: TimeZone,
{
    let day = read_day(store, window)?;
    let stats = aggregate(&day, tz, settings);

    debug!(
        "Stats for {}: max {:.1} min {:.1} rain {:.1} mm sun {} h",
        window.date, stats.t_max, stats.t_min, stats.rain_sum, stats.sun_hours
    );
    Ok(stats)
}

/// Derive [`DayStats`] from already-read rows. Pure and deterministic.
pub fn aggregate<Tz: TimeZone>(day: &DayReadings, tz: &Tz, settings: &ReportSettings) -> DayStats {
    let rain_sum = day
        .rain_rollup
        .map(|raw| settings.scale_rain(raw))
        .filter(|mm| mm.is_finite())
        .unwrap_or(0.0)
        .max(0.0);

    DayStats {
        t_max: day.temperatures.max.unwrap_or(f64::NAN),
        t_min: day.temperatures.min.unwrap_or(f64::NAN),
        rain_sum,
        sun_hours: count_sun_hours(&day.readings, tz, settings.sun_threshold),
    }
}

/// Number of distinct local hours holding at least one reading at or above `threshold`.
///
/// Several qualifying readings in one hour count once. On a 25 hour day the
/// repeated hour shares its bucket, so the result never exceeds 24.
pub fn count_sun_hours<Tz: TimeZone>(readings: &[RawReading], tz: &Tz, threshold: f64) -> u32 {
    let mut sunny_hours = HashSet::new();

    for reading in readings {
        let Some(radiation) = reading.max_solar_rad else {
            continue;
        };
        if radiation < threshold {
            continue;
        }
        match DateTime::from_timestamp(reading.timestamp, 0) {
            Some(utc) => {
                sunny_hours.insert(utc.with_timezone(tz).hour());
            }
            None => warn!("Skipping reading with invalid timestamp {}", reading.timestamp),
        }
    }

    sunny_hours.len() as u32
}
