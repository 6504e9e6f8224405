//! GameView: maps a `GameSnapshot` into a character frame.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crossterm::style::Color;

use crate::core::pieces;
use crate::core::snapshot::GameSnapshot;
use crate::types::{Cell, Phase, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH, PIECE_BOX};

/// One terminal cell of the rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bold: bool,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bold: false,
        }
    }
}

/// A row-major frame of glyphs, sized to the game screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.glyphs[y as usize * self.width as usize + x as usize])
    }

    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.glyphs[y as usize * self.width as usize + x as usize] = glyph;
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Color, bold: bool) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as u16, y, Glyph { ch, fg, bold });
        }
    }

    /// The frame row as plain text, colors dropped. Test helper.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .map(|x| self.get(x, y).unwrap_or_default().ch)
            .collect()
    }
}

/// Board cells are drawn two terminal columns wide to compensate for the
/// typical glyph aspect ratio.
const CELL_W: u16 = 2;
const PANEL_X: u16 = FIELD_WIDTH as u16 * CELL_W + 2;
const FRAME_W: u16 = PANEL_X + 18;
const FRAME_H: u16 = FIELD_HEIGHT as u16;

pub fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::T => Color::Magenta,
        PieceKind::O => Color::Yellow,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
        PieceKind::L => Color::DarkYellow,
        PieceKind::J => Color::Blue,
    }
}

/// Renders snapshots into frames. Stateless; exists so hosts can hold one
/// value and keep layout knobs in one place.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    pub fn frame_size(&self) -> (u16, u16) {
        (FRAME_W, FRAME_H)
    }

    pub fn render(&self, snapshot: &GameSnapshot) -> Frame {
        let mut frame = Frame::new(FRAME_W, FRAME_H);

        self.draw_field(&mut frame, snapshot);
        self.draw_active(&mut frame, snapshot);
        self.draw_panel(&mut frame, snapshot);
        self.draw_overlay(&mut frame, snapshot);

        frame
    }

    fn draw_cell_pair(&self, frame: &mut Frame, x: u16, y: u16, ch: char, fg: Color, bold: bool) {
        frame.put(x * CELL_W, y, Glyph { ch, fg, bold });
        frame.put(x * CELL_W + 1, y, Glyph { ch, fg, bold });
    }

    fn draw_field(&self, frame: &mut Frame, snapshot: &GameSnapshot) {
        for y in 0..FIELD_HEIGHT as u16 {
            for x in 0..FIELD_WIDTH as u16 {
                match snapshot.grid[y as usize][x as usize] {
                    Cell::Empty => {
                        self.draw_cell_pair(frame, x, y, ' ', Color::Reset, false);
                    }
                    Cell::Border => {
                        self.draw_cell_pair(frame, x, y, '▒', Color::Grey, false);
                    }
                    Cell::Locked(kind) => {
                        self.draw_cell_pair(frame, x, y, '█', piece_color(kind), false);
                    }
                }
            }
        }
    }

    fn draw_active(&self, frame: &mut Frame, snapshot: &GameSnapshot) {
        let Some(active) = snapshot.active else {
            return;
        };
        for (px, py) in pieces::cells(active.kind, active.rotation) {
            let x = active.x + px;
            let y = active.y + py;
            if x >= 0 && y >= 0 {
                self.draw_cell_pair(
                    frame,
                    x as u16,
                    y as u16,
                    '█',
                    piece_color(active.kind),
                    true,
                );
            }
        }
    }

    fn draw_panel(&self, frame: &mut Frame, snapshot: &GameSnapshot) {
        let x = PANEL_X;
        frame.put_str(x, 1, "NEXT", Color::White, true);
        self.draw_preview(frame, x, 2, snapshot.next);

        frame.put_str(x, 8, "SCORE", Color::White, true);
        frame.put_str(x, 9, &snapshot.score.to_string(), Color::White, false);
        frame.put_str(x, 11, "LEVEL", Color::White, true);
        frame.put_str(x, 12, &snapshot.level.to_string(), Color::White, false);
        frame.put_str(x, 14, "LINES", Color::White, true);
        frame.put_str(x, 15, &snapshot.lines.to_string(), Color::White, false);

        frame.put_str(x, 17, "arrows move/rotate", Color::DarkGrey, false);
        frame.put_str(x, 18, "space drop  p pause", Color::DarkGrey, false);
        frame.put_str(x, 19, "q quit", Color::DarkGrey, false);
    }

    fn draw_preview(&self, frame: &mut Frame, x: u16, y: u16, kind: PieceKind) {
        for py in 0..PIECE_BOX as i8 {
            for px in 0..PIECE_BOX as i8 {
                let occupied = pieces::is_occupied(kind, Rotation::R0, px, py);
                let glyph = Glyph {
                    ch: if occupied { '█' } else { ' ' },
                    fg: piece_color(kind),
                    bold: false,
                };
                frame.put(x + px as u16 * CELL_W, y + py as u16, glyph);
                frame.put(x + px as u16 * CELL_W + 1, y + py as u16, glyph);
            }
        }
    }

    fn draw_overlay(&self, frame: &mut Frame, snapshot: &GameSnapshot) {
        let text = match snapshot.phase {
            Phase::Running => return,
            Phase::Paused => "PAUSED",
            Phase::Over => "GAME OVER",
        };
        let field_w = FIELD_WIDTH as u16 * CELL_W;
        let x = field_w.saturating_sub(text.len() as u16) / 2;
        let y = FRAME_H / 2;
        frame.put_str(x, y, text, Color::White, true);
    }
}
