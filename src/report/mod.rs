//! Report composition
//!
//! Builds the post title and body from two consecutive days of statistics and
//! the current streaks. Composition is pure: identical inputs always produce
//! byte-identical text. Callers must not compose a report when either day
//! lacks valid temperatures.

pub mod composer;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use composer::{compose, condition_emojis};
pub use summary::render_summary;
