//! Pure game logic: board, pieces, randomness, scoring, and the engine.
//!
//! Nothing in this module performs I/O or reads the clock. Hosts drive it
//! with commands and ticks and read it back through snapshots.

pub mod board;
pub mod engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use board::Board;
pub use engine::{ActivePiece, Engine, TickEvents};
pub use rng::SimpleRng;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
