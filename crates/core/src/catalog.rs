//! Shape catalog - rotation states of every piece kind
//!
//! Each rotation state is a fixed 5x5 occupancy grid. Grids are written as
//! ASCII art (`#` filled, `.` empty) and converted at compile time.
//!
//! A kind lists only its distinct rotations: O has one, I/S/Z have two,
//! J/L/T have four. Rotation indices wrap modulo that count.

use crate::types::{PieceKind, SHAPE_GRID};

/// One rotation state: `grid[row][col]`, true where the shape is filled.
pub type ShapeGrid = [[bool; SHAPE_GRID]; SHAPE_GRID];

const fn grid(rows: [&str; SHAPE_GRID]) -> ShapeGrid {
    let mut out = [[false; SHAPE_GRID]; SHAPE_GRID];
    let mut r = 0;
    while r < SHAPE_GRID {
        let bytes = rows[r].as_bytes();
        let mut c = 0;
        while c < SHAPE_GRID {
            out[r][c] = bytes[c] == b'#';
            c += 1;
        }
        r += 1;
    }
    out
}

static S_STATES: [ShapeGrid; 2] = [
    grid([".....", ".....", "..##.", ".##..", "....."]),
    grid([".....", "..#..", "..##.", "...#.", "....."]),
];

static Z_STATES: [ShapeGrid; 2] = [
    grid([".....", ".....", ".##..", "..##.", "....."]),
    grid([".....", "..#..", ".##..", ".#...", "....."]),
];

static I_STATES: [ShapeGrid; 2] = [
    grid([".....", "####.", ".....", ".....", "....."]),
    grid(["..#..", "..#..", "..#..", "..#..", "....."]),
];

static O_STATES: [ShapeGrid; 1] = [grid([".....", ".....", ".##..", ".##..", "....."])];

static J_STATES: [ShapeGrid; 4] = [
    grid([".....", ".#...", ".###.", ".....", "....."]),
    grid([".....", "..##.", "..#..", "..#..", "....."]),
    grid([".....", ".....", ".###.", "...#.", "....."]),
    grid([".....", "..#..", "..#..", ".##..", "....."]),
];

static L_STATES: [ShapeGrid; 4] = [
    grid([".....", "...#.", ".###.", ".....", "....."]),
    grid([".....", "..#..", "..#..", "..##.", "....."]),
    grid([".....", ".....", ".###.", ".#...", "....."]),
    grid([".....", ".##..", "..#..", "..#..", "....."]),
];

static T_STATES: [ShapeGrid; 4] = [
    grid([".....", "..#..", ".###.", ".....", "....."]),
    grid([".....", "..#..", "..##.", "..#..", "....."]),
    grid([".....", ".....", ".###.", "..#..", "....."]),
    grid([".....", "..#..", ".##..", "..#..", "....."]),
];

/// Ordered rotation states for a piece kind. Never empty.
pub fn rotation_states(kind: PieceKind) -> &'static [ShapeGrid] {
    match kind {
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::T => &T_STATES,
    }
}

/// Number of distinct rotation states for a kind.
#[inline]
pub fn variation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Spawn orientation, used for next/hold previews.
pub fn preview_grid(kind: PieceKind) -> &'static ShapeGrid {
    &rotation_states(kind)[0]
}
