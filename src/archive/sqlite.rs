//! WeeWX SQLite archive reader.

use super::ArchiveStore;
use crate::error::{DigestError, Result};
use crate::models::{RainRollup, RawReading, TemperatureExtremes, TimeWindow};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::path::Path;
use tracing::info;

const Q_TEMPERATURE_EXTREMES: &str = "
    SELECT MAX(outTemp), MIN(outTemp)
    FROM archive
    WHERE dateTime >= ?1 AND dateTime < ?2";

const Q_RAIN_AT: &str = "SELECT sum FROM archive_day_rain WHERE dateTime = ?1";

const Q_RAIN_WITHIN: &str = "
    SELECT sum
    FROM archive_day_rain
    WHERE dateTime >= ?1 AND dateTime < ?2
    ORDER BY dateTime
    LIMIT 1";

const Q_READINGS: &str = "
    SELECT dateTime, outTemp, rain, maxSolarRad
    FROM archive
    WHERE dateTime >= ?1 AND dateTime < ?2
    ORDER BY dateTime";

/// Read-only connection to a WeeWX archive database
pub struct SqliteArchive {
    pub(super) conn: Connection,
}

impl SqliteArchive {
    /// Open an existing database file read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| DigestError::database(format!("cannot open {}", path.display()), e))?;

        info!("Opened archive {}", path.display());
        Self::from_connection(conn)
    }

    /// Wrap an already open connection; queries are forced read-only
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA query_only = ON")
            .map_err(|e| DigestError::database("cannot enable query_only", e))?;
        Ok(Self { conn })
    }

    fn rollup_row(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Option<RainRollup>> {
        self.conn
            .prepare_cached(sql)
            .and_then(|mut stmt| {
                stmt.query_row(params, |row| {
                    Ok(RainRollup { sum: row.get(0)? })
                })
                .optional()
            })
            .map_err(|e| DigestError::database("rain rollup query failed", e))
    }
}

impl ArchiveStore for SqliteArchive {
    fn temperature_extremes(&self, window: &TimeWindow) -> Result<TemperatureExtremes> {
        self.conn
            .prepare_cached(Q_TEMPERATURE_EXTREMES)
            .and_then(|mut stmt| {
                stmt.query_row(params![window.start, window.end], |row| {
                    Ok(TemperatureExtremes {
                        max: row.get(0)?,
                        min: row.get(1)?,
                    })
                })
            })
            .map_err(|e| DigestError::database("temperature summary query failed", e))
    }

    fn rain_rollup_at(&self, midnight: i64) -> Result<Option<RainRollup>> {
        self.rollup_row(Q_RAIN_AT, params![midnight])
    }

    fn rain_rollup_within(&self, window: &TimeWindow) -> Result<Option<RainRollup>> {
        self.rollup_row(Q_RAIN_WITHIN, params![window.start, window.end])
    }

    fn sub_daily_readings(&self, window: &TimeWindow) -> Result<Vec<RawReading>> {
        let mut stmt = self
            .conn
            .prepare_cached(Q_READINGS)
            .map_err(|e| DigestError::database("archive readings query failed", e))?;

        let rows = stmt
            .query_map(params![window.start, window.end], |row| {
                Ok(RawReading {
                    timestamp: row.get(0)?,
                    out_temp: row.get(1)?,
                    rain: row.get(2)?,
                    max_solar_rad: row.get(3)?,
                })
            })
            .map_err(|e| DigestError::database("archive readings query failed", e))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DigestError::database("cannot read archive row", e))
    }
}
