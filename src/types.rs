//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Field dimensions, including the 1-cell border on all four sides.
/// The playable area is (FIELD_WIDTH - 2) x (FIELD_HEIGHT - 2).
pub const FIELD_WIDTH: u8 = 12;
pub const FIELD_HEIGHT: u8 = 22;

/// Side length of the bounding box every piece mask lives in.
pub const PIECE_BOX: u8 = 4;

/// Spawn origin of the piece bounding box (top playable row, centered).
pub const SPAWN_X: i8 = (FIELD_WIDTH as i8) / 2 - 2;
pub const SPAWN_Y: i8 = 1;

/// Host loop pacing: one logical tick per 50ms wall time.
pub const TICK_MS: u64 = 50;

/// Gravity cadence in ticks-per-drop. Lower is faster.
pub const INITIAL_SPEED_TICKS: u32 = 20;
pub const MIN_SPEED_TICKS: u32 = 5;
pub const SPEED_STEP_TICKS: u32 = 2;

/// A level-up every 5 cleared lines.
pub const LINES_PER_LEVEL: u32 = 5;

/// Line clear scoring, indexed by rows cleared in one lock event.
/// Multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Flat bonus per locked piece, multiplied by the current level.
pub const LOCK_BONUS: u32 = 10;

/// Leaderboard keeps the best N scores.
pub const LEADERBOARD_SIZE: usize = 5;

/// The seven piece kinds, in shape-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    O,
    S,
    Z,
    L,
    J,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Index into the shape table.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::L => 5,
            PieceKind::J => 6,
        }
    }
}

/// Rotation states (quarter turns clockwise from spawn orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Rotate clockwise by a quarter turn.
    pub fn cw(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }
}

/// One cell of the field.
///
/// Border cells exist only on the outer ring and are never mutated after
/// construction. Locked cells keep the kind of the piece that produced them
/// so cluster gravity can tell clusters apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Border,
    Locked(PieceKind),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Abstract input commands the engine understands.
///
/// Translation from raw key codes is a host concern (see the `input` module).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MoveLeft,
    MoveRight,
    RotateCw,
    SoftDrop,
    HardDrop,
    TogglePause,
}

/// Engine lifecycle phase. `Over` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Over,
}

/// Discrete outcomes of a tick, for host audio/visual feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PieceLocked,
    LinesCleared(u32),
    LevelUp,
    GameOver,
}
