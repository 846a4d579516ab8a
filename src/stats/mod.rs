//! Daily statistics engine
//!
//! Turns raw archive rows into [`DayStats`](crate::models::DayStats) and
//! derives dry and wet streaks from the daily rain rollup.
//!
//! - [`aggregator`] - temperature extremes, corrected rain sum, sunshine hours
//! - [`streaks`] - single backward scan producing both streak counters
//!
//! All day boundaries and hour buckets are computed in an explicitly passed
//! time zone; nothing here reads the wall clock.

pub mod aggregator;
pub mod streaks;

#[cfg(test)]
pub mod tests;

pub use aggregator::{aggregate, aggregate_day, count_sun_hours};
pub use streaks::analyze_streaks;
