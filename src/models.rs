//! Core data structures for the weather digest.
//!
//! Defines the local-day time window, raw archive readings and the derived
//! values (daily statistics, rain streaks, composed report).

use crate::error::{DigestError, Result};
use chrono::{DateTime, Days, NaiveDate, TimeZone};

/// Half-open interval `[start, end)` of Unix seconds covering one local calendar day.
///
/// On DST transition days the window spans 23 or 25 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub date: NaiveDate,
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Window from local midnight of `date` to local midnight of the next day
    pub fn for_local_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<Self> {
        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DigestError::invalid_date(format!("no day after {}", date)))?;

        Ok(Self {
            date,
            start: local_midnight(date, tz)?,
            end: local_midnight(next, tz)?,
        })
    }
}

/// Unix timestamp of the first instant of `date` in `tz`.
///
/// Zones that skip midnight on a DST change resolve to the first valid
/// instant after the gap.
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<i64> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DigestError::invalid_date(format!("no midnight on {}", date)))?;

    if let Some(instant) = tz.from_local_datetime(&midnight).earliest() {
        return Ok(instant.timestamp());
    }

    (1..=3)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|instant| instant.timestamp())
        .ok_or_else(|| {
            DigestError::invalid_date(format!("midnight of {} does not exist in zone", date))
        })
}

/// Calendar date `days` days before the local date of `now` in `tz`
pub fn local_day_before<Tz: TimeZone>(now: &DateTime<Tz>, tz: &Tz, days: u64) -> Result<NaiveDate> {
    let today = now.with_timezone(tz).date_naive();
    today
        .checked_sub_days(Days::new(days))
        .ok_or_else(|| DigestError::invalid_date(format!("{} days before {}", days, today)))
}

/// One `archive` row as used for sunshine counting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub timestamp: i64,
    pub out_temp: Option<f64>,
    pub rain: Option<f64>,
    pub max_solar_rad: Option<f64>,
}

impl RawReading {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            out_temp: None,
            rain: None,
            max_solar_rad: None,
        }
    }

    pub fn with_out_temp(mut self, value: f64) -> Self {
        self.out_temp = Some(value);
        self
    }

    pub fn with_rain(mut self, value: f64) -> Self {
        self.rain = Some(value);
        self
    }

    pub fn with_solar_rad(mut self, value: f64) -> Self {
        self.max_solar_rad = Some(value);
        self
    }
}

/// Maximum and minimum outdoor temperature, `None` without valid samples
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureExtremes {
    pub max: Option<f64>,
    pub min: Option<f64>,
}

/// One `archive_day_rain` row, `sum` still in store units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainRollup {
    pub sum: Option<f64>,
}

/// Everything the archive holds for one window, before aggregation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayReadings {
    pub temperatures: TemperatureExtremes,
    /// Daily rain in store units, `None` when no usable rollup row exists
    pub rain_rollup: Option<f64>,
    pub readings: Vec<RawReading>,
}

/// Derived statistics for one calendar day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayStats {
    /// °C, NaN when the day had no valid temperature sample
    pub t_max: f64,
    /// °C, NaN when the day had no valid temperature sample
    pub t_min: f64,
    /// Millimetres, never negative or NaN
    pub rain_sum: f64,
    /// Distinct local hours with at least one sunny reading
    pub sun_hours: u32,
}

impl DayStats {
    pub fn new(t_max: f64, t_min: f64, rain_sum: f64, sun_hours: u32) -> Self {
        Self {
            t_max,
            t_min,
            rain_sum,
            sun_hours,
        }
    }

    /// False if either temperature extreme is the NaN sentinel
    pub fn has_valid_temperatures(&self) -> bool {
        !self.t_max.is_nan() && !self.t_min.is_nan()
    }
}

/// Dry and wet streak lengths ending the day before the reference day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakState {
    pub days_since_rain: u32,
    pub consecutive_rain_days: u32,
}

/// A composed post, handed to the publishers unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub body: String,
}

impl Report {
    /// Single status text for platforms without a separate title
    pub fn as_status(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}
