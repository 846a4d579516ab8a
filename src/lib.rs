//! WeeWX Digest Library
//!
//! Daily weather statistics from a WeeWX SQLite archive, composed into a
//! short German-language report and posted to Lemmy and Mastodon.
//!
//! This library provides tools for:
//! - Reading temperature extremes, rain rollups and sub-daily readings
//! - Aggregating a local calendar day into max/min temperature, rain and sunshine hours
//! - Detecting dry spells and consecutive rain days
//! - Composing the report title and body with condition emojis
//! - Publishing with bounded retries and a daily schedule

pub mod archive;
pub mod config;
pub mod constants;
pub mod digest;
pub mod error;
pub mod models;
pub mod noaa;
pub mod publish;
pub mod report;
pub mod scheduler;
pub mod stats;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use archive::{ArchiveStore, SqliteArchive};
pub use config::Config;
pub use digest::{DailyDigest, build_digest};
pub use error::{DigestError, Result};
pub use models::{DayStats, Report, StreakState, TimeWindow};
