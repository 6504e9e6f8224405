//! Engine module - the deterministic game state machine
//!
//! Owns the board, the active/next piece, and the counters. Hosts feed it
//! abstract commands and discrete ticks; it never touches the clock, the
//! terminal, or any I/O, so the same seed and input sequence replay the
//! same game.

use arrayvec::ArrayVec;

use crate::core::rng::SimpleRng;
use crate::core::scoring::{line_clear_score, lock_bonus, next_speed};
use crate::core::snapshot::GameSnapshot;
use crate::core::Board;
use crate::types::{
    GameCommand, GameEvent, Phase, PieceKind, Rotation, INITIAL_SPEED_TICKS, LINES_PER_LEVEL,
    SPAWN_X, SPAWN_Y,
};

/// The falling piece: kind, orientation, and bounding-box origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A freshly spawned piece at the spawn origin.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }
}

/// Events produced by a single tick. A lock can emit at most a lock, a
/// clear, a level-up, and a game-over.
pub type TickEvents = ArrayVec<GameEvent, 4>;

/// Complete game state and public API.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    /// `None` exactly when the phase is `Over`.
    active: Option<ActivePiece>,
    next: PieceKind,
    rng: SimpleRng,
    score: u32,
    level: u32,
    lines: u32,
    lines_toward_level: u32,
    /// Gravity cadence: ticks between automatic downward steps.
    speed: u32,
    ticks_since_drop: u32,
    phase: Phase,
}

impl Engine {
    /// Create a running game with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let first = rng.next_piece();
        let next = rng.next_piece();
        Self {
            board: Board::new(),
            active: Some(ActivePiece::spawn(first)),
            next,
            rng,
            score: 0,
            level: 1,
            lines: 0,
            lines_toward_level: 0,
            speed: INITIAL_SPEED_TICKS,
            ticks_since_drop: 0,
            phase: Phase::Running,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup in tests and tooling.
    /// Gameplay code must mutate the board only through the lock pipeline.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece, fit-checked. Scenario setup hook; returns
    /// false (and leaves the engine untouched) if the piece does not fit.
    pub fn force_active(&mut self, piece: ActivePiece) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        if !self
            .board
            .piece_fits(piece.kind, piece.rotation, piece.x, piece.y)
        {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Apply one input command. Illegal moves are silent no-ops; nothing
    /// here ever fails or locks a piece.
    pub fn handle_command(&mut self, command: GameCommand) {
        if command == GameCommand::TogglePause {
            self.phase = match self.phase {
                Phase::Running => Phase::Paused,
                Phase::Paused => Phase::Running,
                Phase::Over => Phase::Over,
            };
            return;
        }

        if self.phase != Phase::Running {
            return;
        }
        let Some(active) = self.active else {
            return;
        };

        match command {
            GameCommand::MoveLeft => self.try_shift(active, -1, 0),
            GameCommand::MoveRight => self.try_shift(active, 1, 0),
            GameCommand::SoftDrop => self.try_shift(active, 0, 1),
            GameCommand::RotateCw => {
                let rotation = active.rotation.cw();
                if self
                    .board
                    .piece_fits(active.kind, rotation, active.x, active.y)
                {
                    self.active = Some(ActivePiece { rotation, ..active });
                }
            }
            GameCommand::HardDrop => {
                let mut y = active.y;
                while self.board.piece_fits(active.kind, active.rotation, active.x, y + 1) {
                    y += 1;
                }
                self.active = Some(ActivePiece { y, ..active });
            }
            GameCommand::TogglePause => unreachable!("handled above"),
        }
    }

    fn try_shift(&mut self, active: ActivePiece, dx: i8, dy: i8) {
        let (x, y) = (active.x + dx, active.y + dy);
        if self.board.piece_fits(active.kind, active.rotation, x, y) {
            self.active = Some(ActivePiece { x, y, ..active });
        }
    }

    /// Advance logical time by one tick.
    ///
    /// Every `speed` ticks the active piece steps down one row, or, if it
    /// cannot, the lock/clear/gravity pipeline runs. Returns the events the
    /// tick produced so hosts can drive audio/visual feedback.
    pub fn tick(&mut self) -> TickEvents {
        let mut events = TickEvents::new();
        if self.phase != Phase::Running {
            return events;
        }

        self.ticks_since_drop += 1;
        if self.ticks_since_drop < self.speed {
            return events;
        }
        self.ticks_since_drop = 0;

        let Some(active) = self.active else {
            return events;
        };

        if self
            .board
            .piece_fits(active.kind, active.rotation, active.x, active.y + 1)
        {
            self.active = Some(ActivePiece {
                y: active.y + 1,
                ..active
            });
        } else {
            self.lock_pipeline(active, &mut events);
        }
        events
    }

    /// Lock the piece and run clear, gravity, scoring, leveling, respawn.
    ///
    /// Order is pinned: line clear runs before cluster gravity, so a clear
    /// can strand overhangs that then cascade down in the same lock event.
    fn lock_pipeline(&mut self, active: ActivePiece, events: &mut TickEvents) {
        self.board
            .lock_piece(active.kind, active.rotation, active.x, active.y);
        self.score += lock_bonus(self.level);
        events.push(GameEvent::PieceLocked);

        // Topping out: a piece that locks at the spawn row ends the game
        // before any clearing or respawn happens.
        if active.y <= SPAWN_Y {
            self.game_over(events);
            return;
        }

        let cleared = self.board.clear_full_rows();
        self.board.settle_clusters();

        if cleared > 0 {
            self.score += line_clear_score(cleared, self.level);
            self.lines += cleared;
            self.lines_toward_level += cleared;
            events.push(GameEvent::LinesCleared(cleared));

            // A cascade can leave many complete rows pending, so one lock
            // may advance several levels. All of them count toward speed;
            // the event is emitted once.
            let mut leveled = false;
            while self.lines_toward_level >= LINES_PER_LEVEL {
                self.lines_toward_level -= LINES_PER_LEVEL;
                self.level += 1;
                self.speed = next_speed(self.speed);
                leveled = true;
            }
            if leveled {
                events.push(GameEvent::LevelUp);
            }
        }

        let spawned = ActivePiece::spawn(self.next);
        if self
            .board
            .piece_fits(spawned.kind, spawned.rotation, spawned.x, spawned.y)
        {
            self.active = Some(spawned);
            self.next = self.rng.next_piece();
        } else {
            self.game_over(events);
        }
    }

    fn game_over(&mut self, events: &mut TickEvents) {
        self.phase = Phase::Over;
        self.active = None;
        events.push(GameEvent::GameOver);
    }

    /// Copy the observable state into a caller-owned snapshot.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.grid);
        out.active = self.active.map(Into::into);
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.speed = self.speed;
        out.phase = self.phase;
    }

    /// Allocate and fill a fresh snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}
