//! Read-only access to the station archive.
//!
//! The archive holds sub-daily readings (`archive`) and a per-day rain rollup
//! (`archive_day_rain`). [`ArchiveStore`] is the query interface the
//! statistics engine depends on; [`SqliteArchive`] implements it against a
//! WeeWX SQLite database.
//!
//! Query-execution failures are returned as errors. Absent rows are not:
//! [`read_day`] turns them into `None` and logs a warning so the aggregator
//! can substitute its sentinels.

pub mod sqlite;


pub use sqlite::SqliteArchive;

use crate::error::Result;
use crate::models::{DayReadings, RainRollup, RawReading, TemperatureExtremes, TimeWindow};
use tracing::{debug, warn};

/// Queries the statistics engine needs from a weather-station archive
pub trait ArchiveStore {
    /// MAX/MIN outdoor temperature over the window, ignoring NULL samples
    fn temperature_extremes(&self, window: &TimeWindow) -> Result<TemperatureExtremes>;

    /// Rain rollup row keyed exactly by `midnight` (Unix seconds)
    fn rain_rollup_at(&self, midnight: i64) -> Result<Option<RainRollup>>;

    /// First rain rollup row whose key falls anywhere inside the window
    fn rain_rollup_within(&self, window: &TimeWindow) -> Result<Option<RainRollup>>;

    /// All sub-daily readings inside the window, ordered by timestamp
    fn sub_daily_readings(&self, window: &TimeWindow) -> Result<Vec<RawReading>>;
}

impl<S: ArchiveStore + ?Sized> ArchiveStore for &S {
    fn temperature_extremes(&self, window: &TimeWindow) -> Result<TemperatureExtremes> {
        (**self).temperature_extremes(window)
    }

    fn rain_rollup_at(&self, midnight: i64) -> Result<Option<RainRollup>> {
        (**self).rain_rollup_at(midnight)
    }

    fn rain_rollup_within(&self, window: &TimeWindow) -> Result<Option<RainRollup>> {
        (**self).rain_rollup_within(window)
    }

    fn sub_daily_readings(&self, window: &TimeWindow) -> Result<Vec<RawReading>> {
        (**self).sub_daily_readings(window)
    }
}

/// Run the three reads for one window.
///
/// The rain rollup is looked up by the local-midnight key first. Stores that
/// stamp the rollup somewhere else inside the day are tolerated through a
/// span lookup. A missing or NULL rollup yields `None` plus a warning.
pub fn read_day<S: ArchiveStore + ?Sized>(store: &S, window: &TimeWindow) -> Result<DayReadings> {
    let temperatures = store.temperature_extremes(window)?;
    if temperatures.max.is_none() {
        warn!(
            "MAX(outTemp) is NULL for window {}-{} ({})",
            window.start, window.end, window.date
        );
    }
    if temperatures.min.is_none() {
        warn!(
            "MIN(outTemp) is NULL for window {}-{} ({})",
            window.start, window.end, window.date
        );
    }

    let rollup = match store.rain_rollup_at(window.start)? {
        Some(row) => Some(row),
        None => {
            debug!(
                "No rain rollup keyed at {}, trying span {}-{}",
                window.start, window.start, window.end
            );
            store.rain_rollup_within(window)?
        }
    };

    let rain_rollup = match rollup {
        Some(RainRollup { sum: Some(sum), .. }) => Some(sum),
        Some(RainRollup { sum: None, .. }) => {
            warn!("Daily rain (archive_day_rain.sum) is NULL for {}", window.date);
            None
        }
        None => {
            warn!(
                "Daily rain (archive_day_rain.sum) not found for {} (key {})",
                window.date, window.start
            );
            None
        }
    };

    let readings = store.sub_daily_readings(window)?;
    debug!("Read {} archive rows for {}", readings.len(), window.date);

    Ok(DayReadings {
        temperatures,
        rain_rollup,
        readings,
    })
}
