//! Scoring and leveling rules.
//!
//! Every lock awards a flat level-scaled bonus; clearing rows awards a
//! per-count bonus scaled by level. Levels advance every five cleared rows
//! and each advance shaves two ticks off the gravity cadence, floored.

use crate::types::{LINE_SCORES, LOCK_BONUS, MIN_SPEED_TICKS, SPEED_STEP_TICKS};

/// Points for clearing `rows` rows in a single lock event at `level`.
/// Zero rows score zero; more than four cannot happen with a 4-cell piece.
pub fn line_clear_score(rows: u32, level: u32) -> u32 {
    if rows as usize >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[rows as usize] * level
}

/// Flat bonus awarded once per locked piece, regardless of clears.
pub fn lock_bonus(level: u32) -> u32 {
    LOCK_BONUS * level
}

/// Gravity cadence after a level-up: two ticks faster, floored.
pub fn next_speed(speed: u32) -> u32 {
    speed.saturating_sub(SPEED_STEP_TICKS).max(MIN_SPEED_TICKS)
}
