//! End-to-end engine tests: command/tick sequences against full games.

use cascade_tetris::core::{ActivePiece, Engine, TickEvents};
use cascade_tetris::types::{
    Cell, GameCommand, GameEvent, Phase, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH,
    INITIAL_SPEED_TICKS, SPAWN_Y,
};

const BOTTOM: i8 = FIELD_HEIGHT as i8 - 2;

/// Tick through one full gravity interval, returning the final tick's events.
fn gravity_step(engine: &mut Engine) -> TickEvents {
    let mut events = TickEvents::new();
    for _ in 0..engine.speed() {
        events = engine.tick();
        if !events.is_empty() {
            break;
        }
    }
    events
}

/// Force a piece into the spawn box, hard drop it, and lock it.
fn drop_piece(engine: &mut Engine, kind: PieceKind, rotation: Rotation, x: i8) -> TickEvents {
    assert!(engine.force_active(ActivePiece {
        kind,
        rotation,
        x,
        y: SPAWN_Y,
    }));
    engine.handle_command(GameCommand::HardDrop);
    let events = gravity_step(engine);
    assert!(events.contains(&GameEvent::PieceLocked));
    events
}

fn fill_row_except(engine: &mut Engine, y: i8, gap_x: i8, kind: PieceKind) {
    for x in 1..FIELD_WIDTH as i8 - 1 {
        if x != gap_x {
            assert!(engine.board_mut().set(x, y, Cell::Locked(kind)));
        }
    }
}

#[test]
fn test_full_game_reaches_game_over() {
    let mut engine = Engine::new(2024);
    let mut saw_game_over = false;

    for _ in 0..10_000 {
        engine.handle_command(GameCommand::HardDrop);
        let events = engine.tick();
        if events.contains(&GameEvent::GameOver) {
            saw_game_over = true;
            break;
        }
    }

    assert!(saw_game_over, "stacking hard drops must top out");
    assert_eq!(engine.phase(), Phase::Over);
    assert!(engine.active().is_none());
    assert!(engine.score() > 0, "every lock scores at least the bonus");
}

#[test]
fn test_identical_seeds_produce_identical_games() {
    let mut a = Engine::new(31337);
    let mut b = Engine::new(31337);

    for i in 0..3_000 {
        let command = match i % 5 {
            0 => GameCommand::MoveLeft,
            1 => GameCommand::MoveRight,
            2 => GameCommand::RotateCw,
            3 => GameCommand::SoftDrop,
            _ => GameCommand::HardDrop,
        };
        a.handle_command(command);
        b.handle_command(command);
        assert_eq!(a.tick(), b.tick());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_score_accumulates_lock_bonus_per_piece() {
    let mut engine = Engine::new(7);
    let level = engine.level();

    drop_piece(&mut engine, PieceKind::O, Rotation::R0, 1);
    drop_piece(&mut engine, PieceKind::O, Rotation::R0, 7);

    assert_eq!(engine.score(), 2 * 10 * level);
}

#[test]
fn test_single_clear_scores_one_hundred_at_level_one() {
    let mut engine = Engine::new(7);
    fill_row_except(&mut engine, BOTTOM, 5, PieceKind::T);

    // Vertical I with its occupied column over the gap.
    let events = drop_piece(&mut engine, PieceKind::I, Rotation::R0, 3);

    assert!(events.contains(&GameEvent::LinesCleared(1)));
    assert_eq!(engine.lines(), 1);
    assert_eq!(engine.score(), 100 + 10);
}

#[test]
fn test_clear_strands_overhang_that_settles_onto_floor() {
    let mut engine = Engine::new(7);

    // Partial floor so the row above it clears instead of the bottom row.
    for x in 1..=4 {
        engine.board_mut().set(x, BOTTOM, Cell::Locked(PieceKind::O));
    }
    fill_row_except(&mut engine, BOTTOM - 1, 5, PieceKind::T);
    // A Z domino resting on the soon-to-be-cleared row.
    engine.board_mut().set(8, BOTTOM - 2, Cell::Locked(PieceKind::Z));
    engine.board_mut().set(8, BOTTOM - 3, Cell::Locked(PieceKind::Z));

    let events = drop_piece(&mut engine, PieceKind::I, Rotation::R0, 3);
    assert!(events.contains(&GameEvent::LinesCleared(1)));

    // The domino shifted down with the clear, then cascaded into the gap
    // below it and landed on the floor.
    assert_eq!(engine.board().get(8, BOTTOM), Some(Cell::Locked(PieceKind::Z)));
    assert_eq!(
        engine.board().get(8, BOTTOM - 1),
        Some(Cell::Locked(PieceKind::Z))
    );
    assert_eq!(engine.board().get(8, BOTTOM - 2), Some(Cell::Empty));
}

#[test]
fn test_cascade_sets_up_next_lock_clear() {
    let mut engine = Engine::new(7);

    // Bottom row complete except one gap, with a floating column hanging
    // over the gap. Settling fills the gap; the completed row is cleared
    // by the next lock.
    fill_row_except(&mut engine, BOTTOM, 7, PieceKind::S);
    for y in [BOTTOM - 5, BOTTOM - 4, BOTTOM - 3] {
        engine.board_mut().set(7, y, Cell::Locked(PieceKind::J));
    }

    // A lock anywhere runs the pipeline; settle drops the J column into
    // the gap, completing the bottom row (cleared on the next lock).
    drop_piece(&mut engine, PieceKind::O, Rotation::R0, 1);
    assert!(engine.board().row_complete(BOTTOM));

    let events = drop_piece(&mut engine, PieceKind::O, Rotation::R0, 3);
    assert!(events.contains(&GameEvent::LinesCleared(1)));
}

#[test]
fn test_level_and_speed_progression() {
    let mut engine = Engine::new(7);
    assert_eq!(engine.speed(), INITIAL_SPEED_TICKS);

    // Five single clears: exactly one level-up.
    for _ in 0..5 {
        fill_row_except(&mut engine, BOTTOM, 5, PieceKind::T);
        let before = engine.lines();
        drop_piece(&mut engine, PieceKind::I, Rotation::R0, 3);
        assert_eq!(engine.lines(), before + 1);
        // Leftover I cells stack in the gap column; clear them for a
        // clean slate each round.
        for y in 1..FIELD_HEIGHT as i8 - 1 {
            for x in 1..FIELD_WIDTH as i8 - 1 {
                engine.board_mut().set(x, y, Cell::Empty);
            }
        }
    }

    assert_eq!(engine.lines(), 5);
    assert_eq!(engine.level(), 2);
    assert_eq!(engine.speed(), INITIAL_SPEED_TICKS - 2);
}

#[test]
fn test_movement_against_wall_is_ignored() {
    let mut engine = Engine::new(7);
    for _ in 0..2 * FIELD_WIDTH {
        engine.handle_command(GameCommand::MoveRight);
    }
    let piece = engine.active().unwrap();
    engine.handle_command(GameCommand::MoveRight);
    assert_eq!(engine.active().unwrap(), piece);
}

#[test]
fn test_pause_freezes_everything_until_unpaused() {
    let mut engine = Engine::new(7);
    engine.handle_command(GameCommand::TogglePause);
    let snapshot = engine.snapshot();

    for _ in 0..1_000 {
        engine.handle_command(GameCommand::SoftDrop);
        assert!(engine.tick().is_empty());
    }
    assert_eq!(engine.snapshot(), snapshot);

    engine.handle_command(GameCommand::TogglePause);
    assert_eq!(engine.phase(), Phase::Running);
}

#[test]
fn test_top_out_emits_game_over_and_stops_the_game() {
    let mut engine = Engine::new(7);
    // A filled well up to the spawn area forces the next lock to top out.
    for y in 4..=BOTTOM {
        for x in 4..=8 {
            engine.board_mut().set(x, y, Cell::Locked(PieceKind::L));
        }
    }
    assert!(engine.force_active(ActivePiece {
        kind: PieceKind::O,
        rotation: Rotation::R0,
        x: 4,
        y: SPAWN_Y,
    }));

    let events = gravity_step(&mut engine);
    assert!(events.contains(&GameEvent::GameOver));
    assert_eq!(engine.phase(), Phase::Over);

    // Terminal: nothing moves afterwards.
    let snapshot = engine.snapshot();
    for _ in 0..100 {
        engine.handle_command(GameCommand::HardDrop);
        engine.tick();
    }
    assert_eq!(engine.snapshot(), snapshot);
}
