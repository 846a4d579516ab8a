//! Console summary printed before publishing.

use crate::models::DayStats;
use colored::*;

/// Multi-line overview of both days, prior day in parentheses
pub fn render_summary(station: &str, date_label: &str, today: &DayStats, prior: &DayStats) -> String {
    let rows = [
        (
            "Höchsttemperatur:",
            format!("{:.1} °C", today.t_max),
            format!("{:.1} °C", prior.t_max),
        ),
        (
            "Tiefsttemperatur:",
            format!("{:.1} °C", today.t_min),
            format!("{:.1} °C", prior.t_min),
        ),
        (
            "Niederschlag:",
            format!("{:.1} mm", today.rain_sum),
            format!("{:.1} mm", prior.rain_sum),
        ),
        (
            "Sonnenstunden:",
            format!("{} h", today.sun_hours),
            format!("{} h", prior.sun_hours),
        ),
    ];

    let mut out = format!(
        "{}\n",
        format!("Statistik für {} {}: (Vortag)", station, date_label)
            .bright_green()
            .bold()
    );
    for (label, value, previous) in rows {
        out.push_str(&format!(
            "  {} {} ({})\n",
            format!("{:<19}", label).bright_cyan(),
            value.bright_white().bold(),
            previous
        ));
    }
    out
}
