//! Terminal runner for Cascade Tetris.
//!
//! Owns the clock and the terminal: translates key events into engine
//! commands, ticks the engine every 50ms, and renders snapshots. The
//! engine itself never blocks or touches I/O.

use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use cascade_tetris::core::Engine;
use cascade_tetris::input::{handle_key_event, should_quit};
use cascade_tetris::scores::{Leaderboard, SCORES_FILE};
use cascade_tetris::term::{GameView, TerminalRenderer};
use cascade_tetris::types::{Phase, TICK_MS};

fn main() -> Result<()> {
    print_instructions();
    wait_for_enter()?;
    countdown();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();

    match result {
        Ok(final_score) => finish(final_score),
        Err(e) => Err(e),
    }
}

fn run(term: &mut TerminalRenderer) -> Result<u32> {
    let mut engine = Engine::new(seed_from_clock());
    let view = GameView;
    let mut snapshot = engine.snapshot();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS);

    loop {
        engine.snapshot_into(&mut snapshot);
        term.draw(&view.render(&snapshot))?;

        if snapshot.phase == Phase::Over {
            // Leave the final board on screen until a key is pressed.
            loop {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        break;
                    }
                }
            }
            return Ok(snapshot.score);
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(engine.score());
                    }
                    if let Some(command) = handle_key_event(key) {
                        engine.handle_command(command);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            engine.tick();
        }
    }
}

fn finish(final_score: u32) -> Result<()> {
    println!("Final score: {final_score}");

    let path = Path::new(SCORES_FILE);
    // A corrupt score file is surfaced instead of being silently replaced.
    let mut board = match Leaderboard::load(path) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("warning: leaving high scores untouched: {e:#}");
            return Ok(());
        }
    };

    if board.qualifies(final_score) {
        print!("New high score! Enter your name: ");
        io::stdout().flush()?;
        let mut name = String::new();
        io::stdin().read_line(&mut name)?;
        let name = name.trim();
        board.insert(if name.is_empty() { "anon" } else { name }, final_score);
        board.save(path)?;
    }

    if !board.entries().is_empty() {
        println!("\nHigh scores:");
        for (i, entry) in board.entries().iter().enumerate() {
            println!("  {}. {:<12} {}", i + 1, entry.name, entry.score);
        }
    }
    Ok(())
}

fn print_instructions() {
    println!("CASCADE TETRIS");
    println!();
    println!("Clear rows to score. After a clear, floating same-colored");
    println!("groups fall until they land, which can set up chain clears.");
    println!();
    println!("  left/right  move        up      rotate");
    println!("  down        soft drop   space   hard drop");
    println!("  p           pause       q/esc   quit");
    println!();
    println!("Press Enter to start.");
}

fn countdown() {
    for n in (1..=3).rev() {
        println!("{n}...");
        std::thread::sleep(Duration::from_secs(1));
    }
}

fn wait_for_enter() -> Result<()> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}

fn seed_from_clock() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
