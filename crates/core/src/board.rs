//! Board module - the set of locked cells
//!
//! Locked cells are kept in an ordered map from coordinate to the piece kind
//! that produced them. Coordinates order row-major, so a single row is one
//! contiguous range of the map.
//! Coordinates: (x, y) where x ranges 0..width (left to right) and y grows
//! downward. Rows above the board (y < 0) are valid keys.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, Pos, BOARD_HEIGHT, BOARD_WIDTH, PIECE_CELLS};

/// Row indices touched by a single lock (at most one per piece cell).
pub type RowSet = ArrayVec<i32, PIECE_CELLS>;

/// The game board - locked cells keyed by coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: BTreeMap<Pos, PieceKind>,
}

impl Board {
    /// Create a new empty board with the default 10x20 size
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty board with `width` columns and `height` rows
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: BTreeMap::new(),
        }
    }

    /// Get width of the board
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Get the locked cell at `pos`
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells.get(&pos).copied()
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Lock a single cell. Returns the kind previously stored there, if any.
    pub fn put(&mut self, pos: Pos, kind: PieceKind) -> Cell {
        self.cells.insert(pos, kind)
    }

    /// Unlock a single cell. Returns the kind that was stored there, if any.
    pub fn remove(&mut self, pos: Pos) -> Cell {
        self.cells.remove(&pos)
    }

    /// Number of locked cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate locked cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Pos, PieceKind)> + '_ {
        self.cells.iter().map(|(&pos, &kind)| (pos, kind))
    }

    /// Check if a row is completely filled across all columns
    pub fn is_row_full(&self, y: i32) -> bool {
        let row = self.cells.range(Pos::new(0, y)..Pos::new(self.width, y));
        row.count() == self.width as usize
    }

    /// Rows among `candidates` that are completely filled, in the order given
    ///
    /// Sized for the rows touched by one lock; at most `PIECE_CELLS` rows are
    /// reported. Use [`Board::full_rows`] for a full rescan.
    pub fn completed_rows(&self, candidates: &[i32]) -> RowSet {
        let mut rows = RowSet::new();
        for &y in candidates {
            if rows.contains(&y) || !self.is_row_full(y) {
                continue;
            }
            if rows.try_push(y).is_err() {
                break;
            }
        }
        rows
    }

    /// Every completely filled row, top to bottom (full rescan)
    pub fn full_rows(&self) -> Vec<i32> {
        let mut rows: Vec<i32> = self.cells.keys().map(|pos| pos.y).collect();
        rows.dedup();
        rows.retain(|&y| self.is_row_full(y));
        rows
    }

    /// Remove every cell in `rows` and drop the survivors to close the gaps.
    ///
    /// Each surviving cell moves down by the number of cleared rows below it.
    /// New positions are computed from the pre-clear map and the map is
    /// replaced in one step, so no cell is shifted twice.
    /// Returns the number of distinct rows cleared.
    pub fn clear_and_shift(&mut self, rows: &[i32]) -> usize {
        if rows.is_empty() {
            return 0;
        }

        let mut cleared = rows.to_vec();
        cleared.sort_unstable();
        cleared.dedup();

        let before = std::mem::take(&mut self.cells);
        self.cells = before
            .into_iter()
            .filter(|(pos, _)| cleared.binary_search(&pos.y).is_err())
            .map(|(pos, kind)| {
                let below = cleared.len() - cleared.partition_point(|&r| r <= pos.y);
                (Pos::new(pos.x, pos.y + below as i32), kind)
            })
            .collect();

        cleared.len()
    }

    /// True if any locked cell sits at or above `spawn_row` (loss signal)
    pub fn top_row_occupied(&self, spawn_row: i32) -> bool {
        self.cells
            .range(..Pos::new(i32::MIN, spawn_row.saturating_add(1)))
            .next()
            .is_some()
    }

    /// Write the visible rows into a flat row-major grid of `width * height` cells
    pub fn write_grid(&self, out: &mut Vec<Cell>) {
        let width = self.width.max(0) as usize;
        let height = self.height.max(0) as usize;
        out.clear();
        out.resize(width.saturating_mul(height), None);
        let visible = self
            .cells
            .range(Pos::new(0, 0)..Pos::new(0, self.height))
            .filter(|(pos, _)| pos.x >= 0 && pos.x < self.width);
        for (pos, &kind) in visible {
            out[pos.y as usize * width + pos.x as usize] = Some(kind);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
