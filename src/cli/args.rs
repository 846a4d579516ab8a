//! Command-line argument definitions
//!
//! Defines the CLI using the clap derive API.

use crate::constants::DEFAULT_CONFIG_PATH;
use clap::Parser;
use std::path::PathBuf;

/// Daily weather statistics from a WeeWX archive, posted to Lemmy and Mastodon
#[derive(Debug, Clone, Parser)]
#[command(
    name = "weewx-digest",
    version,
    about = "Post daily weather statistics from a WeeWX archive to Lemmy and Mastodon",
    long_about = "Reads yesterday's and the day before's readings from a WeeWX SQLite archive, \
                  computes temperature extremes, rain and sunshine hours plus dry and wet streaks, \
                  and posts a short German-language summary to Lemmy and optionally Mastodon. \
                  Runs once by default or every day at a fixed local hour with --loop."
)]
pub struct Args {
    /// Path to the WeeWX SQLite archive (e.g. /var/lib/weewx/weewx.sdb)
    #[arg(value_name = "DB_PATH")]
    pub db_path: PathBuf,

    /// Configuration file; created with defaults if missing
    #[arg(short = 'c', long = "config", value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,

    /// Print what would be posted instead of posting
    #[arg(short = 't', long = "test")]
    pub test_mode: bool,

    /// Keep running and post every day at the configured hour
    #[arg(short = 'l', long = "loop")]
    pub loop_mode: bool,

    /// NOAA monthly report to cross-check the rain sum against (test mode)
    #[arg(long = "noaa", value_name = "FILE")]
    pub noaa_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
