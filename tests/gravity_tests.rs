//! Cluster gravity tests: rigid-body settling of same-colored groups.

use cascade_tetris::core::Board;
use cascade_tetris::types::{Cell, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

const BOTTOM: i8 = FIELD_HEIGHT as i8 - 2;

#[test]
fn test_l_shaped_cluster_falls_rigidly_and_keeps_its_shape() {
    let mut board = Board::new();
    for (x, y) in [(3, 5), (3, 6), (4, 6)] {
        board.set(x, y, Cell::Locked(PieceKind::T));
    }

    assert!(board.settle_clusters() > 0);

    assert_eq!(board.get(3, BOTTOM - 1), Some(Cell::Locked(PieceKind::T)));
    assert_eq!(board.get(3, BOTTOM), Some(Cell::Locked(PieceKind::T)));
    assert_eq!(board.get(4, BOTTOM), Some(Cell::Locked(PieceKind::T)));
    assert_eq!(board.get(4, BOTTOM - 1), Some(Cell::Empty));
}

#[test]
fn test_stacked_foreign_clusters_settle_in_order() {
    let mut board = Board::new();
    // An S domino resting directly on a floating Z domino.
    board.set(5, 10, Cell::Locked(PieceKind::Z));
    board.set(6, 10, Cell::Locked(PieceKind::Z));
    board.set(5, 9, Cell::Locked(PieceKind::S));
    board.set(6, 9, Cell::Locked(PieceKind::S));

    board.settle_clusters();

    // Z reaches the floor; S lands back on top of it.
    assert_eq!(board.get(5, BOTTOM), Some(Cell::Locked(PieceKind::Z)));
    assert_eq!(board.get(6, BOTTOM), Some(Cell::Locked(PieceKind::Z)));
    assert_eq!(board.get(5, BOTTOM - 1), Some(Cell::Locked(PieceKind::S)));
    assert_eq!(board.get(6, BOTTOM - 1), Some(Cell::Locked(PieceKind::S)));
    assert_eq!(board.settle_clusters(), 0);
}

#[test]
fn test_one_supported_cell_holds_the_whole_cluster() {
    let mut board = Board::new();
    // A horizontal O bar with support under only its left cell.
    for x in [4, 5, 6] {
        board.set(x, 10, Cell::Locked(PieceKind::O));
    }
    board.set(4, 11, Cell::Locked(PieceKind::L));
    for y in 12..=BOTTOM {
        board.set(4, y, Cell::Locked(PieceKind::L));
    }

    assert_eq!(board.settle_clusters(), 0);
    assert_eq!(board.get(6, 10), Some(Cell::Locked(PieceKind::O)));
}

#[test]
fn test_settling_into_a_gap_completes_a_row() {
    let mut board = Board::new();
    for x in 1..FIELD_WIDTH as i8 - 1 {
        if x != 7 {
            board.set(x, BOTTOM, Cell::Locked(PieceKind::S));
        }
    }
    // A column hanging over the gap.
    for y in [5, 6, 7] {
        board.set(7, y, Cell::Locked(PieceKind::J));
    }

    assert!(board.settle_clusters() > 0);
    assert!(board.row_complete(BOTTOM));
    assert_eq!(board.clear_full_rows(), 1);
    assert!(!board.row_complete(BOTTOM));
}

#[test]
fn test_settling_is_idempotent_at_the_fixed_point() {
    let mut board = Board::new();
    // A spread of disconnected clusters at assorted heights and kinds.
    let cells = [
        (2, 3, PieceKind::I),
        (2, 4, PieceKind::I),
        (5, 7, PieceKind::T),
        (6, 7, PieceKind::T),
        (6, 8, PieceKind::T),
        (9, 2, PieceKind::Z),
        (9, 3, PieceKind::S),
        (4, 15, PieceKind::O),
        (5, 15, PieceKind::O),
    ];
    for (x, y, kind) in cells {
        board.set(x, y, Cell::Locked(kind));
    }

    board.settle_clusters();
    assert_eq!(board.settle_clusters(), 0);
    assert_eq!(board.settle_clusters(), 0);
}
