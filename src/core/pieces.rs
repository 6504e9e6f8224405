//! Piece geometry: 4x4 shape masks and discrete rotation.
//!
//! Each piece is a 16-character mask read through a closed-form index
//! permutation per rotation state, instead of rotating coordinates with
//! matrix math. The masks are process-wide constants.

use crate::types::{PieceKind, Rotation, PIECE_BOX};

/// Shape masks, one 16-char string per [`PieceKind`] in `index()` order.
/// `X` marks an occupied cell of the 4x4 bounding box, row-major.
const SHAPES: [&str; 7] = [
    "..X...X...X...X.", // I
    "..X..XX...X.....", // T
    ".....XX..XX.....", // O
    "..X..XX..X......", // S
    ".X...XX...X.....", // Z
    ".X...X...XX.....", // L
    "..X...X..XX.....", // J
];

/// Map a local cell coordinate under a rotation state to an index into the
/// 16-char mask. Pure and total; all four permutations are their own
/// inverse composition over the 4-cycle.
pub fn rotated_index(px: i8, py: i8, rotation: Rotation) -> usize {
    let (px, py) = (px as isize, py as isize);
    let n = PIECE_BOX as isize;
    let idx = match rotation {
        Rotation::R0 => py * n + px,
        Rotation::R90 => 12 + py - px * n,
        Rotation::R180 => 15 - py * n - px,
        Rotation::R270 => 3 - py + px * n,
    };
    idx as usize
}

/// Whether the mask cell at `(px, py)` is occupied under `rotation`.
pub fn is_occupied(kind: PieceKind, rotation: Rotation, px: i8, py: i8) -> bool {
    SHAPES[kind.index()].as_bytes()[rotated_index(px, py, rotation)] == b'X'
}

/// The four occupied offsets of a piece within its bounding box.
pub fn cells(kind: PieceKind, rotation: Rotation) -> [(i8, i8); 4] {
    let mut out = [(0i8, 0i8); 4];
    let mut n = 0;
    for py in 0..PIECE_BOX as i8 {
        for px in 0..PIECE_BOX as i8 {
            if is_occupied(kind, rotation, px, py) {
                out[n] = (px, py);
                n += 1;
            }
        }
    }
    debug_assert_eq!(n, 4, "every mask has exactly four occupied cells");
    out
}
