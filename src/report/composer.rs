//! Title and body templates.

use crate::config::ReportSettings;
use crate::constants::{emoji, temperature};
use crate::models::{DayStats, Report, StreakState};

/// Compose the post for `today` with `prior` as the comparison day
pub fn compose(
    today: &DayStats,
    prior: &DayStats,
    streaks: &StreakState,
    date_label: &str,
    settings: &ReportSettings,
) -> Report {
    Report {
        title: compose_title(today, prior, date_label, settings),
        body: compose_body(today, prior, streaks, settings),
    }
}

fn compose_title(
    today: &DayStats,
    prior: &DayStats,
    date_label: &str,
    settings: &ReportSettings,
) -> String {
    let emojis = condition_emojis(today);
    let prefix = if emojis.is_empty() {
        String::new()
    } else {
        format!("{} ", emojis.join(" "))
    };

    format!(
        "{}Wetterstatistik für {} {}: Temperatur {:.1} bis {:.1} °C (Vortag: {:.1} bis {:.1}°C)",
        prefix,
        settings.station_name,
        date_label,
        today.t_max,
        today.t_min,
        prior.t_max,
        prior.t_min
    )
}

fn compose_body(
    today: &DayStats,
    prior: &DayStats,
    streaks: &StreakState,
    settings: &ReportSettings,
) -> String {
    let mut body = format!(
        "Niederschlag: {:.1} mm (Vortag: {:.1} mm), Sonnenstunden: {} h (Vortag: {} h) Details: {}",
        today.rain_sum, prior.rain_sum, today.sun_hours, prior.sun_hours, settings.details_url
    );

    let threshold = settings.dry_spell_threshold;
    if streaks.days_since_rain >= threshold {
        if today.rain_sum > 0.0 {
            body.push_str(&format!(
                "\nEs hat nach {} Tagen wieder geregnet.",
                streaks.days_since_rain
            ));
        } else {
            body.push_str(&format!(
                "\nEs hat seit {} Tagen nicht mehr geregnet.",
                streaks.days_since_rain
            ));
        }
    }
    if streaks.consecutive_rain_days >= threshold {
        body.push_str(&format!(
            "\nEs regnet seit {} Tagen jeden Tag.",
            streaks.consecutive_rain_days
        ));
    }

    body
}

/// Condition emojis for a day, in fixed rule order.
///
/// Rules are evaluated independently except the heat tier, where only the
/// highest matching tier fires.
pub fn condition_emojis(day: &DayStats) -> Vec<&'static str> {
    let mut emojis = Vec::new();

    if day.rain_sum > 0.0 {
        emojis.push(emoji::RAIN);
    }

    if day.t_max >= temperature::HEATWAVE_MAX {
        emojis.push(emoji::HEATWAVE);
    } else if day.t_max >= temperature::HOT_MAX {
        emojis.push(emoji::HOT);
    } else if day.t_max >= temperature::SUNNY_MAX {
        emojis.push(emoji::SUNNY);
    }

    if day.t_min < temperature::FREEZING {
        emojis.push(emoji::FROST);
    }
    if day.t_max < temperature::FREEZING {
        emojis.push(emoji::FREEZE);
    }
    if day.t_min >= temperature::WARM_NIGHT_MIN {
        emojis.push(emoji::WARM_NIGHT);
    }

    emojis
}
