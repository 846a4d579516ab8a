//! Tests for title/body templates and emoji selection

use super::*;
use crate::config::ReportSettings;
use crate::constants::emoji;
use crate::report::{compose, condition_emojis};

fn compose_default(today: &DayStats, streaks: &StreakState) -> crate::models::Report {
    compose(
        today,
        &june_24(),
        streaks,
        "25.06.2025",
        &ReportSettings::default(),
    )
}

#[test]
fn test_end_to_end_summer_day() {
    let report = compose(
        &june_25(),
        &june_24(),
        &no_streaks(),
        "25.06.2025",
        &ReportSettings::default(),
    );

    assert!(report.body.contains(
        "Niederschlag: 0.0 mm (Vortag: 0.0 mm), Sonnenstunden: 14 h (Vortag: 15 h)"
    ));
    assert!(report.body.ends_with("Details: https://groloe.wetter.foxel.org/week.html"));
    assert!(report.title.contains("29.2 bis 19.3"));
    assert!(report.title.contains("22.4 bis 10.7"));
    assert!(report.title.starts_with(&format!("{} Wetterstatistik", emoji::SUNNY)));

    for absent in [emoji::RAIN, emoji::FROST, emoji::FREEZE, emoji::WARM_NIGHT] {
        assert!(!report.title.contains(absent));
    }
}

#[test]
fn test_full_title_layout() {
    let report = compose_default(&june_25(), &no_streaks());
    assert_eq!(
        report.title,
        "☀️ Wetterstatistik für Overath 25.06.2025: Temperatur 29.2 bis 19.3 °C (Vortag: 22.4 bis 10.7°C)"
    );
}

#[test]
fn test_no_emoji_means_no_prefix() {
    let mild = DayStats::new(18.0, 8.0, 0.0, 3);
    let report = compose_default(&mild, &no_streaks());
    assert!(report.title.starts_with("Wetterstatistik für Overath"));
}

#[test]
fn test_emoji_order_rain_heatwave_frost() {
    let day = DayStats::new(36.0, -1.0, 5.0, 10);
    assert_eq!(
        condition_emojis(&day),
        vec![emoji::RAIN, emoji::HEATWAVE, emoji::FROST]
    );

    let report = compose_default(&day, &no_streaks());
    let expected = format!("{} {} {} Wetterstatistik", emoji::RAIN, emoji::HEATWAVE, emoji::FROST);
    assert!(report.title.starts_with(&expected));
}

#[test]
fn test_heat_tiers_are_exclusive() {
    assert_eq!(condition_emojis(&DayStats::new(35.0, 15.0, 0.0, 0)), vec![emoji::HEATWAVE]);
    assert_eq!(condition_emojis(&DayStats::new(30.0, 15.0, 0.0, 0)), vec![emoji::HOT]);
    assert_eq!(condition_emojis(&DayStats::new(25.0, 15.0, 0.0, 0)), vec![emoji::SUNNY]);
    assert!(condition_emojis(&DayStats::new(24.9, 15.0, 0.0, 0)).is_empty());
}

#[test]
fn test_frost_and_freeze_can_co_occur() {
    assert_eq!(
        condition_emojis(&DayStats::new(-2.0, -8.0, 0.0, 0)),
        vec![emoji::FROST, emoji::FREEZE]
    );
}

#[test]
fn test_warm_night() {
    assert_eq!(
        condition_emojis(&DayStats::new(31.0, 20.0, 0.0, 0)),
        vec![emoji::HOT, emoji::WARM_NIGHT]
    );
}

#[test]
fn test_dry_spell_sentence() {
    let streaks = StreakState {
        days_since_rain: 5,
        consecutive_rain_days: 0,
    };
    let report = compose_default(&june_25(), &streaks);
    assert!(report.body.ends_with("\nEs hat seit 5 Tagen nicht mehr geregnet."));
}

#[test]
fn test_rain_resumed_sentence() {
    let streaks = StreakState {
        days_since_rain: 4,
        consecutive_rain_days: 0,
    };
    let wet = DayStats::new(18.0, 9.0, 2.4, 1);
    let report = compose_default(&wet, &streaks);
    assert!(report.body.ends_with("\nEs hat nach 4 Tagen wieder geregnet."));
    assert!(report.body.contains("Niederschlag: 2.4 mm"));
}

#[test]
fn test_short_dry_spell_not_mentioned() {
    let streaks = StreakState {
        days_since_rain: 2,
        consecutive_rain_days: 0,
    };
    let report = compose_default(&june_25(), &streaks);
    assert!(!report.body.contains('\n'));
}

#[test]
fn test_rain_spell_sentence() {
    let streaks = StreakState {
        days_since_rain: 0,
        consecutive_rain_days: 3,
    };
    let wet = DayStats::new(14.0, 9.0, 6.1, 0);
    let report = compose_default(&wet, &streaks);
    assert!(report.body.ends_with("\nEs regnet seit 3 Tagen jeden Tag."));
}

#[test]
fn test_custom_station_and_threshold() {
    let settings = ReportSettings {
        station_name: "Bensberg".to_string(),
        dry_spell_threshold: 1,
        ..Default::default()
    };
    let streaks = StreakState {
        days_since_rain: 1,
        consecutive_rain_days: 0,
    };
    let report = compose(&june_25(), &june_24(), &streaks, "25.06.2025", &settings);

    assert!(report.title.contains("Wetterstatistik für Bensberg 25.06.2025"));
    assert!(report.body.contains("seit 1 Tagen"));
}

#[test]
fn test_composition_is_idempotent() {
    let streaks = StreakState {
        days_since_rain: 7,
        consecutive_rain_days: 0,
    };
    let first = compose_default(&june_25(), &streaks);
    let second = compose_default(&june_25(), &streaks);
    assert_eq!(first, second);
}
