//! One reporting cycle: read, aggregate, guard, analyze, compose.
//!
//! [`build_digest`] is synchronous and deterministic for a given archive and
//! "now". Publishing happens afterwards and never re-enters this code, so
//! retries always resend the same report.

use crate::archive::ArchiveStore;
use crate::config::ReportSettings;
use crate::constants::DATE_LABEL_FORMAT;
use crate::error::Result;
use crate::models::{DayStats, Report, StreakState, TimeWindow, local_day_before};
use crate::report::compose;
use crate::stats::{aggregate_day, analyze_streaks};
use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::{info, warn};

/// Everything computed for the day being reported
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDigest {
    /// Reported day ("yesterday" relative to the run)
    pub date: NaiveDate,
    pub date_label: String,
    pub today: DayStats,
    pub prior: DayStats,
    pub streaks: StreakState,
    pub report: Report,
}

/// Build the digest for the calendar day before `now`.
///
/// Returns `Ok(None)` when either day lacks valid temperatures; nothing must
/// be published for such a cycle. Query failures are returned as errors.
pub fn build_digest<S, Tz>(
    store: &S,
    now: &DateTime<Tz>,
    tz: &Tz,
    settings: &ReportSettings,
) -> Result<Option<DailyDigest>>
where
    S: ArchiveStore + ?Sized,
    Tz: TimeZone,
{
    let reference_day = local_day_before(now, tz, 0)?;
    let target_day = local_day_before(now, tz, 1)?;
    let prior_day = local_day_before(now, tz, 2)?;

    let target_window = TimeWindow::for_local_day(target_day, tz)?;
    let prior_window = TimeWindow::for_local_day(prior_day, tz)?;
    info!(
        "Computing statistics for {} (comparison day {})",
        target_day, prior_day
    );

    let today = aggregate_day(store, &target_window, tz, settings)?;
    let prior = aggregate_day(store, &prior_window, tz, settings)?;

    if !today.has_valid_temperatures() || !prior.has_valid_temperatures() {
        warn!("Invalid weather data (NaN temperatures), skipping this report");
        return Ok(None);
    }

    let streaks = analyze_streaks(store, reference_day, tz, settings);
    let date_label = target_day.format(DATE_LABEL_FORMAT).to_string();
    let report = compose(&today, &prior, &streaks, &date_label, settings);

    Ok(Some(DailyDigest {
        date: target_day,
        date_label,
        today,
        prior,
        streaks,
        report,
    }))
}
