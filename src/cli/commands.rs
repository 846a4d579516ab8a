//! Command implementations for the weewx-digest CLI
//!
//! Wires configuration, the archive, the digest pipeline and the publishers
//! together, either once or on a daily schedule.

use crate::archive::SqliteArchive;
use crate::cli::args::Args;
use crate::config::Config;
use crate::digest::{DailyDigest, build_digest};
use crate::error::{DigestError, Result};
use crate::models::Report;
use crate::noaa::{RainComparison, read_noaa_rain};
use crate::publish::{
    LemmyPublisher, MastodonPublisher, RetryPolicy, http_client, publish_with_retry,
};
use crate::report::render_summary;
use crate::scheduler::{next_run_after, until};
use chrono::Utc;
use chrono_tz::Tz;
use colored::Colorize;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// What a single cycle ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Report was handed to the configured platforms
    Published { platforms: usize, failures: usize },
    /// Test mode: report printed, nothing sent
    Previewed,
    /// Temperatures were missing, nothing composed
    Skipped,
}

/// Main command execution
pub async fn run(args: Args, cancel: CancellationToken) -> Result<()> {
    setup_logging(&args);
    info!("Starting weewx-digest v{}", env!("CARGO_PKG_VERSION"));

    let config = load_configuration(&args.config_path)?;
    let tz = config.time_zone()?;

    if args.test_mode {
        info!("Test mode: reports are printed, not posted");
    }

    if !args.loop_mode {
        let outcome = run_cycle(&args, &config, &tz, &cancel).await?;
        debug!("Cycle finished: {:?}", outcome);
        return Ok(());
    }

    info!(
        "Loop mode: posting every day at {:02}:00 ({})",
        config.schedule.run_hour, config.report.timezone
    );

    loop {
        // Archive and query failures end the process; publish failures are
        // already logged inside the cycle
        let outcome = run_cycle(&args, &config, &tz, &cancel).await?;
        debug!("Cycle finished: {:?}", outcome);

        let now = Utc::now().with_timezone(&tz);
        let next = next_run_after(&now, config.schedule.run_hour, &tz)?;
        info!("Next run at {}", next.format("%Y-%m-%d %H:%M %Z"));

        tokio::select! {
            _ = tokio::time::sleep(until(&now, &next)) => {}
            _ = cancel.cancelled() => {
                info!("Shutdown requested, leaving loop");
                return Ok(());
            }
        }
    }
}

/// One full reporting cycle for the day before now
pub async fn run_cycle(
    args: &Args,
    config: &Config,
    tz: &Tz,
    cancel: &CancellationToken,
) -> Result<CycleOutcome> {
    let now = Utc::now().with_timezone(tz);

    let digest = {
        let archive = SqliteArchive::open(&args.db_path)?;
        build_digest(&archive, &now, tz, &config.report)?
    };

    let Some(digest) = digest else {
        return Ok(CycleOutcome::Skipped);
    };

    println!(
        "{}",
        render_summary(
            &config.report.station_name,
            &digest.date_label,
            &digest.today,
            &digest.prior
        )
    );

    if args.test_mode {
        if let Some(noaa_path) = &args.noaa_file {
            compare_with_noaa(noaa_path, &digest);
        }
        print_preview(config, &digest.report);
        return Ok(CycleOutcome::Previewed);
    }
    if args.noaa_file.is_some() {
        debug!("NOAA comparison only runs in test mode, ignoring --noaa");
    }

    publish_report(config, &digest.report, cancel).await
}

/// Send the report to every configured platform concurrently
async fn publish_report(
    config: &Config,
    report: &Report,
    cancel: &CancellationToken,
) -> Result<CycleOutcome> {
    let client = http_client()?;
    let policy = RetryPolicy::from(&config.schedule);

    let lemmy = async {
        if !config.lemmy.is_configured() {
            warn!("Lemmy password not set, skipping Lemmy");
            return None;
        }
        let publisher = LemmyPublisher::new(client.clone(), config.lemmy.clone());
        Some(publish_with_retry(&publisher, report, &policy, cancel).await)
    };

    let mastodon = async {
        if !config.mastodon.is_configured() {
            debug!("Mastodon not configured, skipping");
            return None;
        }
        let publisher = MastodonPublisher::new(client.clone(), config.mastodon.clone());
        Some(publish_with_retry(&publisher, report, &policy, cancel).await)
    };

    let (lemmy_result, mastodon_result) = tokio::join!(lemmy, mastodon);

    let mut platforms = 0;
    let mut failures = 0;
    for (platform, result) in [("Lemmy", lemmy_result), ("Mastodon", mastodon_result)] {
        let Some(result) = result else { continue };
        platforms += 1;
        match result {
            Ok(()) => {}
            Err(e @ DigestError::Interrupted { .. }) => return Err(e),
            Err(e) => {
                failures += 1;
                error!("Could not post to {}: {}", platform, e);
            }
        }
    }

    if platforms == 0 {
        warn!("No platform configured, report was not posted");
    }

    Ok(CycleOutcome::Published {
        platforms,
        failures,
    })
}

/// Print what would have been posted
fn print_preview(config: &Config, report: &Report) {
    println!();
    println!("{}", "=== Lemmy post (test mode) ===".bold());
    println!(
        "{} {}",
        "Community:".bright_cyan(),
        config.lemmy.community
    );
    println!("{} {}", "Title:".bright_cyan(), report.title);
    println!("{} {}", "Body:".bright_cyan(), report.body);

    if config.mastodon.is_configured() {
        println!();
        println!("{}", "=== Mastodon status (test mode) ===".bold());
        println!("{}", report.as_status());
    }
}

/// Compare the computed rain sum with WeeWX's own NOAA report
fn compare_with_noaa(path: &Path, digest: &DailyDigest) {
    let noaa_mm = match read_noaa_rain(path, digest.date) {
        Ok(value) => value,
        Err(e) => {
            warn!("NOAA comparison skipped: {}", e);
            return;
        }
    };

    let comparison = RainComparison {
        archive_mm: digest.today.rain_sum,
        noaa_mm,
    };

    println!();
    println!(
        "{} archive {:.1} mm, NOAA {:.1} mm",
        "Rain check:".bright_cyan(),
        comparison.archive_mm,
        comparison.noaa_mm
    );
    if comparison.matches() {
        println!("{}", "Rain sums match".green());
    } else {
        println!(
            "{}",
            format!(
                "Rain sums differ by {:.2} mm",
                (comparison.noaa_mm - comparison.archive_mm).abs()
            )
            .yellow()
        );
    }
}

/// Load the config file, write it back so new defaults appear, then validate
fn load_configuration(path: &Path) -> Result<Config> {
    let config = Config::load(path)?;

    if let Err(e) = config.save(path) {
        warn!("Could not write configuration back to {}: {}", path.display(), e);
    }
    if !config.lemmy.is_configured() {
        warn!(
            "Lemmy password is not set. Edit {} to enable posting",
            path.display()
        );
    }

    config.validate()?;
    debug!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Set up logging based on CLI arguments
///
/// A subscriber installed earlier in the process (e.g. by a test harness)
/// stays in place.
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weewx_digest={}", log_level)));

    let installed = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    match installed {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(e) => debug!("Keeping existing log subscriber: {}", e),
    }
}
