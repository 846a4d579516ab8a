//! Daily run scheduling for loop mode.

use crate::error::{DigestError, Result};
use chrono::{DateTime, Days, NaiveDate, TimeZone};
use std::time::Duration;

/// Next local `hour:00` strictly after `now`: today if still ahead, otherwise tomorrow
pub fn next_run_after<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32, tz: &Tz) -> Result<DateTime<Tz>> {
    let today = now.with_timezone(tz).date_naive();
    let candidate = run_time_on(today, hour, tz)?;
    if candidate > *now {
        return Ok(candidate);
    }

    let tomorrow = today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| DigestError::invalid_date(format!("no day after {}", today)))?;
    run_time_on(tomorrow, hour, tz)
}

/// `hour:00` on `date`, or the first existing hour after it if a DST gap swallows it
fn run_time_on<Tz: TimeZone>(date: NaiveDate, hour: u32, tz: &Tz) -> Result<DateTime<Tz>> {
    (hour..hour + 3)
        .filter_map(|h| date.and_hms_opt(h, 0, 0))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .ok_or_else(|| {
            DigestError::invalid_date(format!("{:02}:00 on {} does not exist in zone", hour, date))
        })
}

/// Time left until `next`, zero if it already passed
pub fn until<Tz: TimeZone>(now: &DateTime<Tz>, next: &DateTime<Tz>) -> Duration {
    next.clone()
        .signed_duration_since(now.clone())
        .to_std()
        .unwrap_or(Duration::ZERO)
}
