//! Game state module - the simulation engine
//!
//! Owns the board, the current/next/hold pieces and the hold flag. Each call
//! to [`GameState::tick`] or [`GameState::apply_action`] applies exactly one
//! mutation and reports what happened as an [`Outcome`].
//!
//! States: `Falling` while a piece is live, `GameOver` once a freshly spawned
//! piece collides or a locked cell reaches the spawn row. `GameOver` is
//! terminal; a new round is a new `GameState`.

use crate::board::{Board, RowSet};
use crate::config::{ConfigError, EngineConfig};
use crate::piece::Piece;
use crate::rng::PieceQueue;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    GameOver,
}

/// Emitted whenever a piece locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Cleared row indices as they were before the shift
    pub cleared_rows: RowSet,
    /// The lock ended the round
    pub game_over: bool,
}

/// Result of one tick or intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The move was accepted (possibly snapped to a wall)
    Moved,
    /// The rotation was accepted (a single-state kind rotates onto itself)
    Rotated,
    /// Collision; nothing changed
    Blocked,
    Locked(LockEvent),
    Held,
    /// The live piece was found overlapping the stack after a hold swap
    ToppedOut,
    /// Game over, or hold already used for this piece
    Ignored,
}

impl Outcome {
    pub fn lock_event(&self) -> Option<&LockEvent> {
        match self {
            Outcome::Locked(event) => Some(event),
            _ => None,
        }
    }
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    current: Piece,
    next: Piece,
    hold: Option<Piece>,
    used_hold: bool,
    phase: Phase,
    piece_queue: PieceQueue,
    /// Monotonic id of the live piece (increments on every promotion from next).
    piece_id: u32,
    /// Rows cleared so far this round.
    lines: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Start a round on the default 10x20 board
    pub fn new(seed: u32) -> Self {
        let config = EngineConfig::default();
        Self::build(config, Board::with_size(config.columns, config.rows), None, None, seed)
    }

    /// Start a round with custom parameters
    pub fn with_config(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::with_size(config.columns, config.rows);
        Ok(Self::build(config, board, None, None, seed))
    }

    /// Start a round from a prepared board with fixed current and next kinds.
    ///
    /// Later pieces come from the seeded randomizer as usual.
    pub fn from_parts(
        config: EngineConfig,
        board: Board,
        current: PieceKind,
        next: PieceKind,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.width() != config.columns || board.height() != config.rows {
            return Err(ConfigError::BoardMismatch {
                columns: config.columns,
                rows: config.rows,
                got_columns: board.width(),
                got_rows: board.height(),
            });
        }
        Ok(Self::build(config, board, Some(current), Some(next), seed))
    }

    fn build(
        config: EngineConfig,
        board: Board,
        current: Option<PieceKind>,
        next: Option<PieceKind>,
        seed: u32,
    ) -> Self {
        let mut piece_queue = PieceQueue::new(config.randomizer, seed);
        let current = current.unwrap_or_else(|| piece_queue.draw());
        let next = next.unwrap_or_else(|| piece_queue.draw());

        let mut state = Self {
            config,
            board,
            current: Piece::spawn(current, config.spawn),
            next: Piece::spawn(next, config.spawn),
            hold: None,
            used_hold: false,
            phase: Phase::Falling,
            piece_queue,
            piece_id: 1,
            lines: 0,
            last_event: None,
        };
        state.current = state.current.clamped(config.columns);
        state.next = state.next.clamped(config.columns);
        if state.spawn_blocked() {
            state.phase = Phase::GameOver;
        }
        state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The live piece; None once the round is over
    pub fn current(&self) -> Option<Piece> {
        match self.phase {
            Phase::Falling => Some(self.current),
            Phase::GameOver => None,
        }
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn hold_piece(&self) -> Option<Piece> {
        self.hold
    }

    /// Whether a hold intent would be accepted now
    pub fn can_hold(&self) -> bool {
        !self.used_hold && !self.game_over()
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn seed(&self) -> u32 {
        self.piece_queue.seed()
    }

    /// Where a hard drop would leave the live piece
    pub fn ghost(&self) -> Option<Piece> {
        self.current()
            .map(|piece| piece.hard_drop_target(&self.board))
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.columns = self.board.width();
        out.rows = self.board.height();
        out.active = self.current().map(ActiveSnapshot::from);
        out.ghost_y = self.ghost().map(|piece| piece.y);
        out.next = self.next.kind;
        out.hold = self.hold.map(|piece| piece.kind);
        out.can_hold = self.can_hold();
        out.game_over = self.game_over();
        out.piece_id = self.piece_id;
        out.lines = self.lines;
        out.seed = self.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Gravity tick: move down one row, locking if blocked
    pub fn tick(&mut self) -> Outcome {
        if self.game_over() {
            return Outcome::Ignored;
        }
        if let Some(outcome) = self.check_topped_out() {
            return outcome;
        }
        self.step_down()
    }

    /// Apply one intent
    pub fn apply_action(&mut self, action: GameAction) -> Outcome {
        if self.game_over() {
            return Outcome::Ignored;
        }
        if action != GameAction::Hold {
            if let Some(outcome) = self.check_topped_out() {
                return outcome;
            }
        }

        match action {
            GameAction::MoveLeft => self.shift(-1),
            GameAction::MoveRight => self.shift(1),
            GameAction::SoftDrop => self.step_down(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::Hold => self.hold(),
        }
    }

    fn shift(&mut self, dx: i32) -> Outcome {
        if self.current.attempt_move(dx, 0, &self.board) {
            Outcome::Moved
        } else {
            Outcome::Blocked
        }
    }

    fn rotate(&mut self, clockwise: bool) -> Outcome {
        if self.current.attempt_rotate(clockwise, &self.board) {
            Outcome::Rotated
        } else {
            Outcome::Blocked
        }
    }

    fn step_down(&mut self) -> Outcome {
        if self.current.attempt_move(0, 1, &self.board) {
            Outcome::Moved
        } else {
            Outcome::Locked(self.lock_piece())
        }
    }

    fn hard_drop(&mut self) -> Outcome {
        self.current = self.current.hard_drop_target(&self.board);
        Outcome::Locked(self.lock_piece())
    }

    /// Swap the live piece with the hold slot (once per piece).
    ///
    /// Collision at spawn is not checked here; the next tick or intent
    /// detects an overlapping piece and ends the round.
    fn hold(&mut self) -> Outcome {
        if self.used_hold {
            return Outcome::Ignored;
        }

        let outgoing = self.spawn_piece(self.current.kind);
        match self.hold.take() {
            Some(held) => {
                self.current = self.spawn_piece(held.kind);
            }
            None => {
                self.promote_next();
            }
        }
        self.hold = Some(outgoing);
        self.used_hold = true;
        Outcome::Held
    }

    /// Lock the live piece, clear completed rows and bring in the next piece
    fn lock_piece(&mut self) -> LockEvent {
        let touched = self.current.lock_into(&mut self.board);
        let cleared_rows = self.board.completed_rows(&touched);
        let lines_cleared = self.board.clear_and_shift(&cleared_rows) as u32;
        self.lines += lines_cleared;

        self.promote_next();
        self.used_hold = false;

        if self.spawn_blocked() {
            self.phase = Phase::GameOver;
        }

        let event = LockEvent {
            lines_cleared,
            cleared_rows,
            game_over: self.game_over(),
        };
        self.last_event = Some(event.clone());
        event
    }

    fn promote_next(&mut self) {
        let kind = self.piece_queue.draw();
        self.current = self.next;
        self.next = self.spawn_piece(kind);
        self.piece_id = self.piece_id.wrapping_add(1);
    }

    fn spawn_piece(&self, kind: PieceKind) -> Piece {
        Piece::spawn(kind, self.config.spawn).clamped(self.config.columns)
    }

    fn spawn_blocked(&self) -> bool {
        self.current.collides(&self.board) || self.board.top_row_occupied(self.config.spawn.y)
    }

    fn check_topped_out(&mut self) -> Option<Outcome> {
        if self.current.collides(&self.board) {
            self.phase = Phase::GameOver;
            Some(Outcome::ToppedOut)
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
