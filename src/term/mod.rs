//! Terminal rendering layer.
//!
//! `view` is pure (snapshot in, character frame out) so it can be
//! unit-tested; `renderer` owns the real terminal and flushes frames
//! through crossterm.

pub mod renderer;
pub mod view;

pub use renderer::TerminalRenderer;
pub use view::{Frame, GameView, Glyph};
