//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal front-end, tests).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (the engine accepts others at construction):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0), the origin of the 5x5 shape grid
//!
//! Rows above the board (`y < 0`) are valid coordinates; they are simply not
//! visible.
//!
//! # Timing
//!
//! The engine never reads a clock. The front-end owns timing:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Front-end frame interval (~60 FPS) |
//! | `GRAVITY_MS` | 500 | Default period between gravity ticks |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Pos, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(PieceKind::T.index()), Some(PieceKind::T));
//! assert_eq!(GameAction::ALL.len(), 7);
//!
//! // Positions order row-major: row first, then column.
//! assert!(Pos::new(9, 0) < Pos::new(0, 1));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: i32 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: i32 = 20;

/// Default spawn column of the shape-grid origin
pub const SPAWN_X: i32 = 3;

/// Default spawn row of the shape-grid origin
pub const SPAWN_Y: i32 = 0;

/// Side length of every shape occupancy grid (5x5)
pub const SHAPE_GRID: usize = 5;

/// Filled cells per shape
pub const PIECE_CELLS: usize = 4;

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default gravity period in milliseconds (one row every half second)
pub const GRAVITY_MS: u32 = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimensions_fit_every_shape_grid() {
        assert!(BOARD_WIDTH >= SHAPE_GRID as i32);
        assert!(BOARD_HEIGHT >= SHAPE_GRID as i32);
        assert!(SPAWN_X + SHAPE_GRID as i32 <= BOARD_WIDTH);
    }

    #[test]
    fn pos_orders_row_major() {
        let mut v = vec![Pos::new(2, 1), Pos::new(0, 1), Pos::new(5, 0), Pos::new(0, -1)];
        v.sort();
        assert_eq!(
            v,
            vec![Pos::new(0, -1), Pos::new(5, 0), Pos::new(0, 1), Pos::new(2, 1)]
        );
    }

    #[test]
    fn piece_kind_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }
}

/// The seven piece kinds
///
/// Each kind has a distinct shape and color:
/// - **S**: Green
/// - **Z**: Red
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
/// - **T**: Purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    S,
    Z,
    I,
    O,
    J,
    L,
    T,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::S,
        PieceKind::Z,
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::S => 0,
            PieceKind::Z => 1,
            PieceKind::I => 2,
            PieceKind::O => 3,
            PieceKind::J => 4,
            PieceKind::L => 5,
            PieceKind::T => 6,
        }
    }

    /// Inverse of [`PieceKind::index`]. Returns None for out-of-range ids.
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Display color as (r, g, b).
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::S => (0, 255, 0),
            PieceKind::Z => (255, 0, 0),
            PieceKind::I => (0, 255, 255),
            PieceKind::O => (255, 255, 0),
            PieceKind::J => (70, 110, 255),
            PieceKind::L => (255, 165, 0),
            PieceKind::T => (160, 60, 200),
        }
    }
}

/// Intents the engine accepts from the input collaborator
///
/// These are already-resolved: key repeat, remapping and timing live
/// outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if blocked
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Advance to the next rotation state
    RotateCw,
    /// Step back to the previous rotation state
    RotateCcw,
    /// Swap with the hold slot (once per piece)
    Hold,
}

impl GameAction {
    /// Every intent, in declaration order.
    pub const ALL: [GameAction; 7] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Hold,
    ];
}

/// A board coordinate: column `x`, row `y` (rows grow downward).
///
/// Field order makes the derived ordering row-major, which the board relies
/// on for per-row range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell, colored by the kind that produced it
pub type Cell = Option<PieceKind>;
