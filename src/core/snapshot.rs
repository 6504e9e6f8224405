//! Read-only state views handed to rendering and persistence collaborators.

use crate::core::engine::ActivePiece;
use crate::types::{Cell, Phase, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a renderer (or score persister) needs, copied out of the
/// engine. Hosts must not feed anything back; the engine owns its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: [[Cell; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub speed: u32,
    pub phase: Phase,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[Cell::Empty; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
            active: None,
            next: PieceKind::I,
            score: 0,
            level: 1,
            lines: 0,
            speed: 0,
            phase: Phase::Running,
        }
    }
}
