//! Application constants for the weather digest
//!
//! Domain thresholds, store-specific unit corrections, report wording and the
//! defaults used by [`crate::config::Config`].

// =============================================================================
// Statistics Thresholds
// =============================================================================

/// Solar radiation (W/m²) at or above which an hour counts as a sunshine hour
pub const SUN_THRESHOLD_WM2: f64 = 120.0;

/// Number of dry (or wet) days after which the report mentions the streak
pub const DRY_SPELL_THRESHOLD: u32 = 3;

/// Maximum number of days the streak scan walks back from the reference day
pub const MAX_STREAK_LOOKBACK_DAYS: u32 = 30;

/// Factor applied to `archive_day_rain.sum` to get millimetres.
///
/// The rain gauge reports in 0.1 mm steps but the daily rollup stores values
/// one tenth of the display unit. Adjust if the store's encoding changes.
pub const RAIN_UNIT_SCALE: f64 = 10.0;

// =============================================================================
// Title Emojis
// =============================================================================

pub mod emoji {
    pub const RAIN: &str = "🌧️";
    pub const HEATWAVE: &str = "🏜️";
    pub const HOT: &str = "🌡️";
    pub const SUNNY: &str = "☀️";
    pub const FROST: &str = "❄️";
    pub const FREEZE: &str = "🧊";
    pub const WARM_NIGHT: &str = "🌙";
}

/// Temperature tiers (°C) that select the title emojis
pub mod temperature {
    pub const HEATWAVE_MAX: f64 = 35.0;
    pub const HOT_MAX: f64 = 30.0;
    pub const SUNNY_MAX: f64 = 25.0;
    pub const FREEZING: f64 = 0.0;
    pub const WARM_NIGHT_MIN: f64 = 20.0;
}

// =============================================================================
// Report Defaults
// =============================================================================

pub const DEFAULT_STATION_NAME: &str = "Overath";
pub const DEFAULT_DETAILS_URL: &str = "https://groloe.wetter.foxel.org/week.html";
pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// Date format used in titles and console output (e.g. `25.06.2025`)
pub const DATE_LABEL_FORMAT: &str = "%d.%m.%Y";

// =============================================================================
// Scheduling and Publishing Defaults
// =============================================================================

/// Local hour at which loop mode runs the daily cycle
pub const DEFAULT_RUN_HOUR: u32 = 4;

pub const DEFAULT_RETRY_INTERVAL_MINUTES: u64 = 30;

/// 48 attempts at 30 minute intervals cover a full day
pub const DEFAULT_MAX_PUBLISH_ATTEMPTS: u32 = 48;

pub const HTTP_TIMEOUT_SECONDS: u64 = 30;

pub const USER_AGENT: &str = concat!("weewx-digest/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

pub const DEFAULT_LEMMY_SERVER: &str = "https://natur.23.nu";
pub const DEFAULT_LEMMY_COMMUNITY: &str = "wetter";
pub const DEFAULT_LEMMY_USERNAME: &str = "wetterbot";

/// Placeholder password written to fresh config files; Lemmy is skipped while set
pub const PLACEHOLDER_PASSWORD: &str = "CHANGEME";

pub const DEFAULT_MASTODON_VISIBILITY: &str = "unlisted";
