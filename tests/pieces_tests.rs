//! Piece tests - catalog geometry, bounding boxes, movement and rotation

use blockfall::core::{rotation_states, variation_count, Board, BoundingBox, Piece};
use blockfall::types::{PieceKind, Pos, BOARD_WIDTH, PIECE_CELLS, SPAWN_X, SPAWN_Y};

fn spawn(kind: PieceKind) -> Piece {
    Piece::spawn(kind, Pos::new(SPAWN_X, SPAWN_Y))
}

#[test]
fn test_every_state_has_four_cells() {
    for kind in PieceKind::ALL {
        for rotation in 0..variation_count(kind) {
            let piece = Piece {
                rotation,
                ..spawn(kind)
            };
            assert_eq!(piece.absolute_cells().count(), PIECE_CELLS, "{:?} r{}", kind, rotation);
        }
    }
}

#[test]
fn test_full_rotation_cycle_returns_to_start() {
    for kind in PieceKind::ALL {
        let start = spawn(kind);
        let mut piece = start;
        for _ in 0..variation_count(kind) {
            piece = piece.rotated(true);
        }
        assert_eq!(piece, start, "{:?}", kind);

        for _ in 0..variation_count(kind) {
            piece = piece.rotated(false);
        }
        assert_eq!(piece, start, "{:?}", kind);
    }
}

#[test]
fn test_ccw_undoes_cw() {
    for kind in PieceKind::ALL {
        let piece = spawn(kind);
        assert_eq!(piece.rotated(true).rotated(false), piece);
    }
}

#[test]
fn test_bounding_box_ignores_position() {
    for kind in PieceKind::ALL {
        let a = spawn(kind);
        let b = a.translated(4, 9);
        assert_eq!(a.bounding_box(), b.bounding_box());
    }
}

#[test]
fn test_bounding_box_matches_cells() {
    for kind in PieceKind::ALL {
        for grid in rotation_states(kind) {
            let bbox = BoundingBox::of(grid);
            let piece = Piece {
                kind,
                x: 0,
                y: 0,
                rotation: rotation_states(kind).iter().position(|g| g == grid).unwrap(),
            };
            let cells: Vec<Pos> = piece.absolute_cells().collect();
            let min_x = cells.iter().map(|p| p.x).min().unwrap();
            let max_x = cells.iter().map(|p| p.x).max().unwrap();
            let min_y = cells.iter().map(|p| p.y).min().unwrap();
            let max_y = cells.iter().map(|p| p.y).max().unwrap();
            assert_eq!(bbox.left, min_x);
            assert_eq!(bbox.top, min_y);
            assert_eq!(bbox.width, max_x - min_x + 1);
            assert_eq!(bbox.height, max_y - min_y + 1);
        }
    }
}

#[test]
fn test_o_piece_has_single_state() {
    assert_eq!(variation_count(PieceKind::O), 1);
    let piece = spawn(PieceKind::O);
    assert_eq!(piece.rotated(true), piece);
}

#[test]
fn test_move_left_at_wall_stays_put() {
    let board = Board::new();
    let mut piece = spawn(PieceKind::J); // left inset 1
    while piece.attempt_move(-1, 0, &board) {
        if piece.x == -1 {
            break;
        }
    }
    assert_eq!(piece.x, -1);

    // Further moves clamp back to the same column.
    assert!(piece.attempt_move(-1, 0, &board));
    assert_eq!(piece.x, -1);
    assert!(piece.absolute_cells().all(|p| p.x >= 0));
}

#[test]
fn test_move_right_clamps_to_last_column() {
    let board = Board::new();
    let mut piece = spawn(PieceKind::I);
    for _ in 0..BOARD_WIDTH {
        piece.attempt_move(1, 0, &board);
    }
    let max_x = piece.absolute_cells().map(|p| p.x).max().unwrap();
    assert_eq!(max_x, BOARD_WIDTH - 1);
}

#[test]
fn test_rotation_near_wall_is_clamped() {
    let board = Board::new();
    // Upright I against the right wall, then lay it flat.
    let mut piece = spawn(PieceKind::I).rotated(true).translated(0, 5);
    for _ in 0..BOARD_WIDTH {
        piece.attempt_move(1, 0, &board);
    }
    assert!(piece.attempt_rotate(true, &board));
    assert_eq!(piece.rotation, 0);
    assert!(piece.absolute_cells().all(|p| p.x >= 0 && p.x < BOARD_WIDTH));
}

#[test]
fn test_hard_drop_target_rests_on_stack() {
    let mut board = Board::new();
    board.put(Pos::new(4, 12), PieceKind::Z);
    let piece = spawn(PieceKind::O); // columns 4-5, rows y+2..=y+3
    let target = piece.hard_drop_target(&board);
    assert_eq!(target.y, 8);
    assert!(!target.collides(&board));
    assert!(target.translated(0, 1).collides(&board));
}

#[test]
fn test_lock_transfers_cells_with_kind() {
    let mut board = Board::new();
    let piece = spawn(PieceKind::S).hard_drop_target(&Board::new());
    let rows = piece.lock_into(&mut board);

    assert_eq!(board.len(), PIECE_CELLS);
    assert!(board.iter().all(|(_, kind)| kind == PieceKind::S));
    assert_eq!(rows.len(), 2);
}
