//! Cascade Tetris: a terminal falling-block game with cluster gravity.
//!
//! Cleared rows do not just shift the stack down. After a clear, every
//! same-colored group left floating falls as a unit until it lands, which
//! can complete further rows on later locks. The deterministic rules live
//! in [`core`]; [`input`] and [`term`] adapt them to a crossterm terminal
//! and [`scores`] persists a small leaderboard.

pub mod core;
pub mod input;
pub mod scores;
pub mod term;
pub mod types;
