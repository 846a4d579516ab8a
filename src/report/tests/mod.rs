//! Tests for report composition

pub mod composer_tests;
pub mod summary_tests;

use crate::models::{DayStats, StreakState};

pub fn june_25() -> DayStats {
    DayStats::new(29.2, 19.3, 0.0, 14)
}

pub fn june_24() -> DayStats {
    DayStats::new(22.4, 10.7, 0.0, 15)
}

pub fn no_streaks() -> StreakState {
    StreakState::default()
}
