//! Cross-check against the WeeWX NOAA monthly report.
//!
//! The NOAA text report has one line per day starting with `DD.MM`, with the
//! day's rain in the fourth whitespace-separated column. Used in test mode to
//! compare the archive-derived rain sum against what WeeWX itself reported.

use crate::error::{DigestError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Two values closer than this are considered equal
pub const RAIN_TOLERANCE_MM: f64 = 0.01;

fn day_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<day>\d{2}\.\d{2})\s+\S+\s+\S+\s+(?P<rain>\S+)").expect("valid regex")
    })
}

/// Rain (mm) reported for `date` in the report text
pub fn parse_noaa_rain(report: &str, date: NaiveDate) -> Result<f64> {
    let wanted = date.format("%d.%m").to_string();

    for line in report.lines() {
        let Some(caps) = day_line_regex().captures(line) else {
            continue;
        };
        if caps["day"] != wanted {
            continue;
        }
        return caps["rain"].parse::<f64>().map_err(|e| {
            DigestError::noaa_report(format!(
                "invalid rain value '{}' for {}: {}",
                &caps["rain"], wanted, e
            ))
        });
    }

    Err(DigestError::noaa_report(format!(
        "no entry for {} in NOAA report",
        wanted
    )))
}

/// Read the report file and extract the rain for `date`
pub fn read_noaa_rain(path: &Path, date: NaiveDate) -> Result<f64> {
    let report = std::fs::read_to_string(path).map_err(|e| DigestError::io(path, e))?;
    parse_noaa_rain(&report, date)
}

/// Outcome of comparing the computed rain sum with the NOAA value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainComparison {
    pub archive_mm: f64,
    pub noaa_mm: f64,
}

impl RainComparison {
    pub fn matches(&self) -> bool {
        (self.noaa_mm - self.archive_mm).abs() < RAIN_TOLERANCE_MM
    }
}
