//! Piece module - a positioned, rotated instance of a catalog shape
//!
//! A piece is a plain `Copy` value. Every attempted mutation builds a
//! candidate piece, clamps it horizontally, checks it against the board and
//! only then replaces the live piece, so a rejected move leaves nothing to
//! undo.

use crate::board::{Board, RowSet};
use crate::catalog::{rotation_states, variation_count, ShapeGrid};
use crate::types::{PieceKind, Pos};

/// Tight box around the filled cells of one rotation state.
///
/// `left`/`top` are the offsets from the grid origin to the first filled
/// column/row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub top: i32,
}

impl BoundingBox {
    /// Scan a grid. An empty grid yields an all-zero box.
    pub fn of(grid: &ShapeGrid) -> Self {
        let mut min_x: Option<usize> = None;
        let mut max_x = 0usize;
        let mut top: Option<usize> = None;
        let mut height = 0i32;

        for (row_idx, row) in grid.iter().enumerate() {
            let Some(first) = row.iter().position(|&filled| filled) else {
                continue;
            };
            let last = row.iter().rposition(|&filled| filled).unwrap_or(first);
            min_x = Some(min_x.map_or(first, |m| m.min(first)));
            max_x = max_x.max(last);
            top.get_or_insert(row_idx);
            height += 1;
        }

        match (min_x, top) {
            (Some(left), Some(top)) => Self {
                width: (max_x - left + 1) as i32,
                height,
                left: left as i32,
                top: top as i32,
            },
            _ => Self {
                width: 0,
                height: 0,
                left: 0,
                top: 0,
            },
        }
    }
}

/// The live (or held / queued) piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
}

impl Piece {
    /// Create a piece at `spawn` in its first rotation state
    pub fn spawn(kind: PieceKind, spawn: Pos) -> Self {
        Self {
            kind,
            x: spawn.x,
            y: spawn.y,
            rotation: 0,
        }
    }

    /// Occupancy grid of the current rotation state
    pub fn grid(&self) -> &'static ShapeGrid {
        let states = rotation_states(self.kind);
        &states[self.rotation % states.len()]
    }

    pub fn variation_count(&self) -> usize {
        variation_count(self.kind)
    }

    /// Bounding box of the current rotation. Recomputed on every call.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::of(self.grid())
    }

    /// Absolute board cells covered by the piece
    ///
    /// Grid rows above the first filled row are skipped.
    pub fn absolute_cells(&self) -> impl Iterator<Item = Pos> {
        let (x, y) = (self.x, self.y);
        let top = self.bounding_box().top as usize;
        self.grid()
            .iter()
            .enumerate()
            .skip(top)
            .flat_map(move |(row, line)| {
                line.iter()
                    .enumerate()
                    .filter(|&(_, &filled)| filled)
                    .map(move |(col, _)| Pos::new(x + col as i32, y + row as i32))
            })
    }

    /// Same piece shifted by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece one rotation state forward (clockwise) or back
    pub fn rotated(&self, clockwise: bool) -> Self {
        let n = self.variation_count();
        let rotation = if clockwise {
            (self.rotation + 1) % n
        } else {
            (self.rotation + n - 1) % n
        };
        Self { rotation, ..*self }
    }

    /// Snap the horizontal position into `[0, columns)`.
    ///
    /// Overreach at either wall is clamped rather than rejected.
    pub fn clamped(&self, columns: i32) -> Self {
        let bbox = self.bounding_box();
        let mut x = self.x;
        if x < -bbox.left {
            x = -bbox.left;
        }
        if x > columns - bbox.width - bbox.left {
            x = columns - bbox.width - bbox.left;
        }
        Self { x, ..*self }
    }

    /// True if the piece overlaps a locked cell or extends below the board.
    ///
    /// Horizontal overreach is not a collision; see [`Piece::clamped`].
    pub fn collides(&self, board: &Board) -> bool {
        let bbox = self.bounding_box();
        if self.y + bbox.top + bbox.height > board.height() {
            return true;
        }
        self.absolute_cells().any(|pos| board.is_occupied(pos))
    }

    /// Clamp a candidate and accept it if it fits.
    fn settle(candidate: Self, board: &Board) -> Option<Self> {
        let candidate = candidate.clamped(board.width());
        (!candidate.collides(board)).then_some(candidate)
    }

    /// Try to shift the piece. Returns false (and leaves it untouched) if blocked.
    pub fn attempt_move(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        match Self::settle(self.translated(dx, dy), board) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Try to rotate in place. No kicks beyond the horizontal clamp.
    ///
    /// A kind with a single rotation state always succeeds without changing.
    pub fn attempt_rotate(&mut self, clockwise: bool, board: &Board) -> bool {
        match Self::settle(self.rotated(clockwise), board) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Resting position of a hard drop from here, without moving the piece
    pub fn hard_drop_target(&self, board: &Board) -> Self {
        let mut resting = *self;
        while let Some(next) = Self::settle(resting.translated(0, 1), board) {
            resting = next;
        }
        resting
    }

    /// Write the piece's cells into the board. Returns the rows touched.
    pub fn lock_into(&self, board: &mut Board) -> RowSet {
        let mut rows = RowSet::new();
        for pos in self.absolute_cells() {
            board.put(pos, self.kind);
            if !rows.contains(&pos.y) {
                rows.push(pos.y);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SPAWN_X, SPAWN_Y};

    fn spawn(kind: PieceKind) -> Piece {
        Piece::spawn(kind, Pos::new(SPAWN_X, SPAWN_Y))
    }

    #[test]
    fn test_bounding_box_of_straight_piece() {
        let flat = spawn(PieceKind::I);
        assert_eq!(
            flat.bounding_box(),
            BoundingBox {
                width: 4,
                height: 1,
                left: 0,
                top: 1
            }
        );

        let upright = flat.rotated(true);
        assert_eq!(
            upright.bounding_box(),
            BoundingBox {
                width: 1,
                height: 4,
                left: 2,
                top: 0
            }
        );
    }

    #[test]
    fn test_absolute_cells_follow_position() {
        let piece = Piece {
            kind: PieceKind::O,
            x: 4,
            y: 7,
            rotation: 0,
        };
        let cells: Vec<Pos> = piece.absolute_cells().collect();
        assert_eq!(
            cells,
            vec![
                Pos::new(5, 9),
                Pos::new(6, 9),
                Pos::new(5, 10),
                Pos::new(6, 10)
            ]
        );
    }

    #[test]
    fn test_clamp_snaps_to_each_wall() {
        let piece = spawn(PieceKind::T); // left inset 1, width 3
        assert_eq!(piece.translated(-10, 0).clamped(10).x, -1);
        assert_eq!(piece.translated(10, 0).clamped(10).x, 6);
        assert_eq!(piece.clamped(10).x, SPAWN_X);
    }

    #[test]
    fn test_collides_below_floor() {
        let board = Board::new();
        let piece = spawn(PieceKind::O); // top 2, height 2
        assert!(!piece.translated(0, 16).collides(&board));
        assert!(piece.translated(0, 17).collides(&board));
    }

    #[test]
    fn test_attempt_move_reverts_on_collision() {
        let mut board = Board::new();
        board.put(Pos::new(4, 6), PieceKind::Z);
        let mut piece = spawn(PieceKind::O); // covers columns 4-5

        for _ in 0..2 {
            assert!(piece.attempt_move(0, 1, &board));
        }
        let before = piece;
        assert!(!piece.attempt_move(0, 1, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_attempt_rotate_blocked_keeps_rotation() {
        let mut board = Board::new();
        let mut piece = spawn(PieceKind::I);
        // Block the column the upright bar would occupy.
        board.put(Pos::new(SPAWN_X + 2, 3), PieceKind::L);

        assert!(!piece.attempt_rotate(true, &board));
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn test_single_state_rotation_is_a_successful_no_op() {
        let board = Board::new();
        let mut piece = spawn(PieceKind::O);
        let before = piece;
        assert!(piece.attempt_rotate(true, &board));
        assert!(piece.attempt_rotate(false, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_hard_drop_target_does_not_move_piece() {
        let board = Board::new();
        let piece = spawn(PieceKind::I);
        let target = piece.hard_drop_target(&board);
        assert_eq!(piece.y, SPAWN_Y);
        assert_eq!(target.y, 18);
        assert_eq!(target.x, piece.x);
    }

    #[test]
    fn test_lock_into_reports_distinct_rows() {
        let mut board = Board::new();
        let piece = spawn(PieceKind::T).translated(0, 10);
        let rows = piece.lock_into(&mut board);
        assert_eq!(rows.as_slice(), &[11, 12]);
        assert_eq!(board.len(), 4);
    }
}
