//! Dry and wet streaks from the daily rain rollup.

use crate::archive::ArchiveStore;
use crate::config::ReportSettings;
use crate::models::{StreakState, local_midnight};
use chrono::{Days, NaiveDate, TimeZone};
use tracing::{debug, warn};

/// Walk back from the day before `reference_day` and count the leading streak.
///
/// One scan fills both counters: a run of dry days feeds `days_since_rain`,
/// a run of wet days feeds `consecutive_rain_days`, and the first day of the
/// opposite kind ends the scan, so at most one counter is non-zero. A day
/// without a readable rollup row also ends the scan and is not counted.
/// At most `settings.max_streak_lookback` days are examined.
pub fn analyze_streaks<S, Tz>(
    store: &S,
    reference_day: NaiveDate,
    tz: &Tz,
    settings: &ReportSettings,
) -> StreakState
where
    S: ArchiveStore + ?Sized,
    Tz: TimeZone,
{
    let mut state = StreakState::default();

    for offset in 1..=u64::from(settings.max_streak_lookback) {
        let Some(day) = reference_day.checked_sub_days(Days::new(offset)) else {
            break;
        };
        let midnight = match local_midnight(day, tz) {
            Ok(ts) => ts,
            Err(e) => {
                warn!("Streak scan stopped at {}: {}", day, e);
                break;
            }
        };

        let rollup = match store.rain_rollup_at(midnight) {
            Ok(Some(rollup)) => rollup,
            Ok(None) => {
                debug!("Streak scan stopped at {}: no rain rollup", day);
                break;
            }
            Err(e) => {
                warn!("Streak scan stopped at {}: {}", day, e);
                break;
            }
        };

        let wet = rollup
            .sum
            .is_some_and(|raw| settings.scale_rain(raw) > 0.0);

        if wet {
            if state.days_since_rain > 0 {
                break;
            }
            state.consecutive_rain_days += 1;
        } else {
            if state.consecutive_rain_days > 0 {
                break;
            }
            state.days_since_rain += 1;
        }
    }

    debug!(
        "Streaks before {}: {} dry, {} wet",
        reference_day, state.days_since_rain, state.consecutive_rain_days
    );
    state
}
