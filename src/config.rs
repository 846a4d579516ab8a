//! Configuration management and validation.
//!
//! The configuration lives in a JSON file next to the binary (by default
//! `config.json`). It holds the publishing credentials plus the report and
//! schedule settings. A missing file yields the defaults, and the loaded
//! configuration is written back so a fresh install ends up with a template
//! to fill in.

use crate::constants::{
    DEFAULT_DETAILS_URL, DEFAULT_LEMMY_COMMUNITY, DEFAULT_LEMMY_SERVER, DEFAULT_LEMMY_USERNAME,
    DEFAULT_MASTODON_VISIBILITY, DEFAULT_MAX_PUBLISH_ATTEMPTS, DEFAULT_RETRY_INTERVAL_MINUTES,
    DEFAULT_RUN_HOUR, DEFAULT_STATION_NAME, DEFAULT_TIMEZONE, DRY_SPELL_THRESHOLD,
    MAX_STREAK_LOOKBACK_DAYS, PLACEHOLDER_PASSWORD, RAIN_UNIT_SCALE, SUN_THRESHOLD_WM2,
};
use crate::error::{DigestError, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Lemmy account and target community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemmyConfig {
    pub server: String,
    pub community: String,
    pub username: String,
    pub password: String,
}

impl Default for LemmyConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_LEMMY_SERVER.to_string(),
            community: DEFAULT_LEMMY_COMMUNITY.to_string(),
            username: DEFAULT_LEMMY_USERNAME.to_string(),
            password: PLACEHOLDER_PASSWORD.to_string(),
        }
    }
}

impl LemmyConfig {
    /// Posting is skipped until a real password replaces the placeholder
    pub fn is_configured(&self) -> bool {
        !self.password.is_empty() && self.password != PLACEHOLDER_PASSWORD
    }
}

/// Mastodon instance and access token; empty values disable posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MastodonConfig {
    pub server: String,
    pub token: String,
    pub visibility: String,
}

impl Default for MastodonConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            token: String::new(),
            visibility: DEFAULT_MASTODON_VISIBILITY.to_string(),
        }
    }
}

impl MastodonConfig {
    pub fn is_configured(&self) -> bool {
        !self.server.is_empty() && !self.token.is_empty()
    }
}

/// Statistics thresholds and report wording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Station name used in titles
    pub station_name: String,

    /// Link appended to every report body
    pub details_url: String,

    /// IANA zone that defines calendar days and hour buckets
    pub timezone: String,

    /// W/m² at or above which an hour counts as sunny
    pub sun_threshold: f64,

    /// Streak length from which the report mentions dry or wet spells
    pub dry_spell_threshold: u32,

    /// Multiplier from rollup store units to millimetres
    pub rain_unit_scale: f64,

    /// Days the streak scan may walk back
    pub max_streak_lookback: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            station_name: DEFAULT_STATION_NAME.to_string(),
            details_url: DEFAULT_DETAILS_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            sun_threshold: SUN_THRESHOLD_WM2,
            dry_spell_threshold: DRY_SPELL_THRESHOLD,
            rain_unit_scale: RAIN_UNIT_SCALE,
            max_streak_lookback: MAX_STREAK_LOOKBACK_DAYS,
        }
    }
}

impl ReportSettings {
    /// Convert a raw rollup value to millimetres
    pub fn scale_rain(&self, raw: f64) -> f64 {
        raw * self.rain_unit_scale
    }
}

/// Daily run time and publish retry policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Local hour (0-23) at which loop mode runs
    pub run_hour: u32,

    pub retry_interval_minutes: u64,

    /// Total publish attempts per platform and cycle
    pub max_publish_attempts: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            run_hour: DEFAULT_RUN_HOUR,
            retry_interval_minutes: DEFAULT_RETRY_INTERVAL_MINUTES,
            max_publish_attempts: DEFAULT_MAX_PUBLISH_ATTEMPTS,
        }
    }
}

impl ScheduleConfig {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_minutes.saturating_mul(60))
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lemmy: LemmyConfig,
    pub mastodon: MastodonConfig,
    pub report: ReportSettings,
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Load from a JSON file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| DigestError::io(path, e))?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            DigestError::configuration(format!("cannot parse {}: {}", path.display(), e))
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).map_err(|e| DigestError::io(path, e))
    }

    /// Check values that would otherwise fail deep inside a cycle
    pub fn validate(&self) -> Result<()> {
        self.time_zone()?;

        if self.schedule.run_hour > 23 {
            return Err(DigestError::configuration(format!(
                "run_hour must be between 0 and 23, got {}",
                self.schedule.run_hour
            )));
        }
        if self.schedule.max_publish_attempts == 0 {
            return Err(DigestError::configuration(
                "max_publish_attempts must be at least 1",
            ));
        }
        let scale = self.report.rain_unit_scale;
        if scale.is_nan() || scale <= 0.0 {
            return Err(DigestError::configuration(format!(
                "rain_unit_scale must be positive, got {}",
                scale
            )));
        }
        if self.report.max_streak_lookback == 0 {
            return Err(DigestError::configuration(
                "max_streak_lookback must be at least 1",
            ));
        }

        Ok(())
    }

    /// Parse the configured IANA time zone
    pub fn time_zone(&self) -> Result<Tz> {
        self.report.timezone.parse::<Tz>().map_err(|e| {
            DigestError::configuration(format!(
                "unknown time zone '{}': {}",
                self.report.timezone, e
            ))
        })
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.report.timezone = timezone.into();
        self
    }

    pub fn with_station_name(mut self, name: impl Into<String>) -> Self {
        self.report.station_name = name.into();
        self
    }

    pub fn with_run_hour(mut self, hour: u32) -> Self {
        self.schedule.run_hour = hour;
        self
    }

    pub fn with_retry_policy(mut self, interval_minutes: u64, max_attempts: u32) -> Self {
        self.schedule.retry_interval_minutes = interval_minutes;
        self.schedule.max_publish_attempts = max_attempts;
        self
    }
}
