//! Read-only copies of engine state for the presentation layer.
//!
//! Snapshots own their data; nothing in them aliases the engine. Callers that
//! render every frame can keep one snapshot and refill it with
//! `GameState::snapshot_into`, which reuses the board allocation.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, PieceKind, Pos, PIECE_CELLS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
    /// Absolute occupied cells
    pub cells: ArrayVec<Pos, PIECE_CELLS>,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.absolute_cells().take(PIECE_CELLS).collect(),
        }
    }
}

impl ActiveSnapshot {
    /// Cells of the same piece moved to row `ghost_y`
    pub fn cells_at(&self, ghost_y: i32) -> impl Iterator<Item = Pos> + '_ {
        let dy = ghost_y - self.y;
        self.cells.iter().map(move |p| Pos::new(p.x, p.y + dy))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub columns: i32,
    pub rows: i32,
    /// Visible locked cells, row-major, `columns * rows` long
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i32>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub game_over: bool,
    pub piece_id: u32,
    pub lines: u32,
    pub seed: u32,
}

impl GameSnapshot {
    /// Locked cell at (x, y); None outside the visible board
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || x >= self.columns || y < 0 || y >= self.rows {
            return None;
        }
        let idx = y as usize * self.columns as usize + x as usize;
        self.board
            .get(idx)
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            columns: 0,
            rows: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            hold: None,
            can_hold: true,
            game_over: false,
            piece_id: 0,
            lines: 0,
            seed: 0,
        }
    }
}
