//! Board module - manages the bordered game field
//!
//! The field is 12x22 including a one-cell border ring; the playable area is
//! 10x20. Cells live in a flat array for cache locality and zero-allocation.
//! Coordinates: (x, y) with x left-to-right and y top-to-bottom; (0, 0) is
//! the top-left border corner.
//!
//! Unlike classic Tetris, clearing a row can leave overhangs that are no
//! longer supported; `settle_clusters` drops those as rigid same-kind
//! clusters (destructible-terrain physics).

use arrayvec::ArrayVec;

use crate::core::pieces;
use crate::types::{Cell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

/// Total number of cells in the field, border included.
const FIELD_SIZE: usize = (FIELD_WIDTH as usize) * (FIELD_HEIGHT as usize);

/// Number of playable (non-border) cells; bounds the flood-fill worklist.
const PLAYABLE_CELLS: usize = (FIELD_WIDTH as usize - 2) * (FIELD_HEIGHT as usize - 2);

/// The game field, borders and all, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; FIELD_SIZE],
}

impl Board {
    /// Create an empty board with its border ring in place.
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; FIELD_SIZE];
        for y in 0..FIELD_HEIGHT as usize {
            cells[y * FIELD_WIDTH as usize] = Cell::Border;
            cells[y * FIELD_WIDTH as usize + FIELD_WIDTH as usize - 1] = Cell::Border;
        }
        for x in 0..FIELD_WIDTH as usize {
            cells[x] = Cell::Border;
            cells[(FIELD_HEIGHT as usize - 1) * FIELD_WIDTH as usize + x] = Cell::Border;
        }
        Self { cells }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i8 || y < 0 || y >= FIELD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (FIELD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set a playable cell. Returns false out of bounds or on a border cell;
    /// the border ring is immutable.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) if self.cells[idx] != Cell::Border => {
                self.cells[idx] = cell;
                true
            }
            _ => false,
        }
    }

    /// Whether (x, y) is in bounds and empty.
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        self.get(x, y).is_some_and(Cell::is_empty)
    }

    /// Collision/fit check: true iff every occupied cell of the piece mask,
    /// placed with its box origin at (x, y), lands in bounds on an empty
    /// cell. The single authority for move/rotate/drop/spawn legality.
    pub fn piece_fits(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        pieces::cells(kind, rotation)
            .iter()
            .all(|&(dx, dy)| self.is_empty(x + dx, y + dy))
    }

    /// Merge a piece into the field, tagging cells with its kind.
    /// Callers must have verified the position with [`Board::piece_fits`].
    pub fn lock_piece(&mut self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) {
        debug_assert!(self.piece_fits(kind, rotation, x, y));
        for (dx, dy) in pieces::cells(kind, rotation) {
            self.set(x + dx, y + dy, Cell::Locked(kind));
        }
    }

    /// Whether a playable row is completely filled with locked cells.
    pub fn row_complete(&self, y: i8) -> bool {
        if y < 1 || y >= FIELD_HEIGHT as i8 - 1 {
            return false;
        }
        (1..FIELD_WIDTH as i8 - 1).all(|x| matches!(self.get(x, y), Some(Cell::Locked(_))))
    }

    /// Clear every complete playable row, shifting rows above down by one and
    /// re-checking the same index after each shift. Borders stay fixed.
    /// Returns the number of rows cleared.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = FIELD_HEIGHT as i8 - 2;
        while y >= 1 {
            if !self.row_complete(y) {
                y -= 1;
                continue;
            }

            for x in 1..FIELD_WIDTH as i8 - 1 {
                self.set(x, y, Cell::Empty);
            }
            for yy in (1..y).rev() {
                for x in 1..FIELD_WIDTH as i8 - 1 {
                    let above = self.get(x, yy).unwrap_or(Cell::Empty);
                    self.set(x, yy + 1, above);
                    self.set(x, yy, Cell::Empty);
                }
            }
            cleared += 1;
            // Content shifted into row y; check it again before moving up.
        }
        cleared
    }

    /// Drop every floating same-kind cluster until nothing moves.
    ///
    /// A cluster is the maximal 4-connected set of locked cells sharing one
    /// piece kind. It floats iff no cell rests on the floor border or on a
    /// foreign locked cell at zero distance; a floating cluster falls as a
    /// rigid body by the largest uniform distance that keeps every cell on
    /// an empty (or cluster-internal) target. Returns how many cluster drops
    /// were performed.
    pub fn settle_clusters(&mut self) -> u32 {
        let mut drops = 0;
        loop {
            let moved = self.settle_pass();
            drops += moved;
            if moved == 0 {
                return drops;
            }
        }
    }

    /// One bottom-to-top, left-to-right settling pass.
    fn settle_pass(&mut self) -> u32 {
        let mut visited = [false; FIELD_SIZE];
        let mut in_cluster = [false; FIELD_SIZE];
        let mut moved = 0;

        for y in (1..FIELD_HEIGHT as i8 - 1).rev() {
            for x in 1..FIELD_WIDTH as i8 - 1 {
                let idx = Self::index(x, y).unwrap();
                let kind = match self.cells[idx] {
                    Cell::Locked(kind) if !visited[idx] => kind,
                    _ => continue,
                };

                let cluster = self.collect_cluster(kind, x, y, &mut visited, &mut in_cluster);

                if self.cluster_is_floating(kind, &cluster) {
                    let distance = self.cluster_drop_distance(&cluster, &in_cluster);
                    if distance > 0 {
                        self.move_cluster(kind, &cluster, distance);
                        moved += 1;
                    }
                }

                for &(cx, cy) in &cluster {
                    in_cluster[Self::index(cx, cy).unwrap()] = false;
                }
            }
        }
        moved
    }

    /// Flood-fill the same-kind cluster containing (x, y) with an explicit
    /// worklist, marking `visited` and `in_cluster` for every member.
    fn collect_cluster(
        &self,
        kind: PieceKind,
        x: i8,
        y: i8,
        visited: &mut [bool; FIELD_SIZE],
        in_cluster: &mut [bool; FIELD_SIZE],
    ) -> ArrayVec<(i8, i8), PLAYABLE_CELLS> {
        let mut cluster = ArrayVec::new();
        let mut worklist: ArrayVec<(i8, i8), PLAYABLE_CELLS> = ArrayVec::new();

        let start = Self::index(x, y).expect("flood-fill starts inside the field");
        visited[start] = true;
        in_cluster[start] = true;
        worklist.push((x, y));

        while let Some((cx, cy)) = worklist.pop() {
            cluster.push((cx, cy));
            for (nx, ny) in [(cx, cy - 1), (cx, cy + 1), (cx - 1, cy), (cx + 1, cy)] {
                if let Some(nidx) = Self::index(nx, ny) {
                    if !visited[nidx] && self.cells[nidx] == Cell::Locked(kind) {
                        visited[nidx] = true;
                        in_cluster[nidx] = true;
                        worklist.push((nx, ny));
                    }
                }
            }
        }
        cluster
    }

    /// A cluster floats iff nothing foreign supports it: every cell's
    /// below-neighbor is empty or belongs to the same kind (and hence the
    /// same cluster).
    fn cluster_is_floating(&self, kind: PieceKind, cluster: &[(i8, i8)]) -> bool {
        cluster.iter().all(|&(cx, cy)| match self.get(cx, cy + 1) {
            Some(Cell::Empty) => true,
            Some(Cell::Locked(k)) => k == kind,
            _ => false,
        })
    }

    /// Largest uniform drop that keeps every cell of the cluster on an empty
    /// or cluster-internal target, so the cluster lands exactly on whatever
    /// is beneath it rather than partially.
    fn cluster_drop_distance(
        &self,
        cluster: &[(i8, i8)],
        in_cluster: &[bool; FIELD_SIZE],
    ) -> i8 {
        let mut distance: i8 = 0;
        'outer: loop {
            for &(cx, cy) in cluster {
                let target = match Self::index(cx, cy + distance + 1) {
                    Some(idx) => idx,
                    None => break 'outer,
                };
                if !(self.cells[target] == Cell::Empty || in_cluster[target]) {
                    break 'outer;
                }
            }
            distance += 1;
        }
        distance
    }

    /// Translate the whole cluster down atomically: erase every cell first,
    /// then rewrite at the new rows, so no cell overwrites a cluster-mate.
    fn move_cluster(&mut self, kind: PieceKind, cluster: &[(i8, i8)], distance: i8) {
        for &(cx, cy) in cluster {
            self.set(cx, cy, Cell::Empty);
        }
        for &(cx, cy) in cluster {
            self.set(cx, cy + distance, Cell::Locked(kind));
        }
    }

    /// Copy the field into a caller-owned grid (allocation-free snapshots).
    pub fn write_grid(&self, out: &mut [[Cell; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize]) {
        for y in 0..FIELD_HEIGHT as usize {
            for x in 0..FIELD_WIDTH as usize {
                out[y][x] = self.cells[y * FIELD_WIDTH as usize + x];
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
