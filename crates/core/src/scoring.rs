//! Scoring module - points, level and fall speed progression
//!
//! Classic rules: a fixed table of points per simultaneous clear multiplied by
//! the current level, one level per ten cleared lines up to level 20, and a
//! linear fall speed-up with a floor.

use crate::types::{
    BASE_FALL_SPEED_SECS, FALL_SPEED_STEP_SECS, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL,
    MIN_FALL_SPEED_SECS,
};

/// Points for clearing `lines` rows at once at `level`.
///
/// Counts above four are scored as four.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Level reached after `total_lines` cumulative cleared lines.
pub fn level_for_lines(total_lines: u32) -> u32 {
    (1 + total_lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Seconds per automatic downward step at `level`.
pub fn fall_speed_for_level(level: u32) -> f64 {
    let steps = level.saturating_sub(1) as f64;
    (BASE_FALL_SPEED_SECS - steps * FALL_SPEED_STEP_SECS).max(MIN_FALL_SPEED_SECS)
}

/// Fall interval in whole milliseconds.
pub fn fall_interval_ms(fall_speed_secs: f64) -> u32 {
    (fall_speed_secs * 1000.0).round().max(1.0) as u32
}
