//! Engine configuration - fixed parameters supplied at construction

use thiserror::Error;

use crate::rng::Randomizer;
use crate::types::{Pos, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_MS, SHAPE_GRID, SPAWN_X, SPAWN_Y};

/// Narrowest board every shape fits across (the flat I is 4 wide).
pub const MIN_COLUMNS: i32 = 4;

/// Shortest board every shape grid fits in.
pub const MIN_ROWS: i32 = SHAPE_GRID as i32;

/// Widest board accepted; keeps cell indices and terminal frame math in range.
pub const MAX_COLUMNS: i32 = 255;

/// Tallest board accepted.
pub const MAX_ROWS: i32 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board needs at least 4 columns, got {0}")]
    TooNarrow(i32),
    #[error("board needs at least 5 rows, got {0}")]
    TooShort(i32),
    #[error("board may have at most 255 columns, got {0}")]
    TooWide(i32),
    #[error("board may have at most 255 rows, got {0}")]
    TooTall(i32),
    #[error("spawn column {x} is outside the board (0..{columns})")]
    SpawnColumn { x: i32, columns: i32 },
    #[error("spawn row {y} must lie in {min}..={max}")]
    SpawnRow { y: i32, min: i32, max: i32 },
    #[error("gravity period must be non-zero")]
    ZeroGravity,
    #[error("board is {got_columns}x{got_rows}, config expects {columns}x{rows}")]
    BoardMismatch {
        columns: i32,
        rows: i32,
        got_columns: i32,
        got_rows: i32,
    },
}

/// Board size, spawn point, gravity cadence and piece rule for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub columns: i32,
    pub rows: i32,
    /// Origin of the shape grid for freshly spawned pieces
    pub spawn: Pos,
    /// Period between gravity ticks. The engine never reads it; the caller's
    /// clock does.
    pub gravity_ms: u32,
    pub randomizer: Randomizer,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            spawn: Pos::new(SPAWN_X, SPAWN_Y),
            gravity_ms: GRAVITY_MS,
            randomizer: Randomizer::Uniform,
        }
    }
}

impl EngineConfig {
    pub fn with_board_size(mut self, columns: i32, rows: i32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_spawn(mut self, spawn: Pos) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_gravity_ms(mut self, gravity_ms: u32) -> Self {
        self.gravity_ms = gravity_ms;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    /// Reject configurations a round cannot be played on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < MIN_COLUMNS {
            return Err(ConfigError::TooNarrow(self.columns));
        }
        if self.columns > MAX_COLUMNS {
            return Err(ConfigError::TooWide(self.columns));
        }
        if self.rows < MIN_ROWS {
            return Err(ConfigError::TooShort(self.rows));
        }
        if self.rows > MAX_ROWS {
            return Err(ConfigError::TooTall(self.rows));
        }
        if self.spawn.x < 0 || self.spawn.x >= self.columns {
            return Err(ConfigError::SpawnColumn {
                x: self.spawn.x,
                columns: self.columns,
            });
        }
        let (min, max) = (-(SHAPE_GRID as i32), self.rows - SHAPE_GRID as i32);
        if self.spawn.y < min || self.spawn.y > max {
            return Err(ConfigError::SpawnRow {
                y: self.spawn.y,
                min,
                max,
            });
        }
        if self.gravity_ms == 0 {
            return Err(ConfigError::ZeroGravity);
        }
        Ok(())
    }
}
