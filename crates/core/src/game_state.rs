//! Game state module - spawn, input dispatch, gravity, lock and speed
//!
//! This module ties the grid, pieces, collision rules and line clearing into
//! the per-session state machine:
//!
//! ```text
//! Spawn -> Falling -> (lock) -> Spawn
//!              \-> top-out -> clear grid, reset speed -> Spawn
//! ```
//!
//! Timing is not tracked here. The caller decides when a gravity tick is due
//! (see the engine crate) and calls [`GameState::gravity_tick`]; everything in
//! this module is deterministic for a given seed and input sequence.

use log::{debug, info};

use crate::collision::{self, RotateOutcome, Turn};
use crate::grid::Grid;
use crate::line_clear::clear_full_rows;
use crate::pieces::{Piece, PieceKind};
use crate::rng::SimpleRng;
use crate::types::*;

/// Tunables for one play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub start_drop_interval_us: u64,
    pub drop_interval_decrement_us: u64,
    pub min_drop_interval_us: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            start_drop_interval_us: START_DROP_INTERVAL_US,
            drop_interval_decrement_us: DROP_INTERVAL_DECREMENT_US,
            min_drop_interval_us: MIN_DROP_INTERVAL_US,
        }
    }
}

impl GameConfig {
    /// Anchor every new piece starts from: centered, on the top row
    pub fn spawn_anchor(&self) -> (i32, i32) {
        ((self.width / 2) as i32, self.height as i32 - 1)
    }
}

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A new piece is required before play can continue
    Spawn,
    /// A piece is falling
    Falling,
}

/// The falling piece and its absolute anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i32,
    pub y: i32,
}

/// What a single input poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing to apply (no input, or no falling piece)
    Idle,
    Rotated(RotateOutcome),
    /// Lateral move; `false` when the move was undone by a collision
    Shifted(bool),
    /// Soft drop: the caller should stop waiting and run the gravity tick now
    SoftDrop,
}

/// What a gravity tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No falling piece to move
    Idle,
    /// Piece moved down one row
    Fell,
    /// Piece merged into the grid
    Locked { rows_cleared: usize },
    /// Piece could not leave the spawn row; the session restarted
    ToppedOut,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    /// Landed cells
    grid: Grid,
    /// Landed cells plus the falling piece, rebuilt by [`GameState::compose`]
    composite: Grid,
    active: Option<ActivePiece>,
    rng: SimpleRng,
    drop_interval_us: u64,
    rows_cleared: u32,
    pieces_locked: u32,
}

impl GameState {
    /// Create a session with default tunables
    pub fn new(seed: u32) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u32) -> Self {
        Self {
            config,
            grid: Grid::new(config.width, config.height),
            composite: Grid::new(config.width, config.height),
            active: None,
            rng: SimpleRng::new(seed),
            drop_interval_us: config.start_drop_interval_us,
            rows_cleared: 0,
            pieces_locked: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        if self.active.is_some() {
            Phase::Falling
        } else {
            Phase::Spawn
        }
    }

    pub fn new_piece_required(&self) -> bool {
        self.active.is_none()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct access to the landed cells, for seeding positions
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn drop_interval_us(&self) -> u64 {
        self.drop_interval_us
    }

    /// Rows cleared since the last top-out
    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// Pieces locked since the last top-out
    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Spawn a random piece if one is required. Returns true if it spawned.
    pub fn ensure_piece(&mut self) -> bool {
        if !self.new_piece_required() {
            return false;
        }
        let piece = Piece::random(&mut self.rng);
        self.spawn(piece);
        true
    }

    /// Spawn a specific shape at the spawn anchor
    pub fn spawn_kind(&mut self, kind: PieceKind) {
        self.spawn(Piece::new(kind));
    }

    fn spawn(&mut self, piece: Piece) {
        let (x, y) = self.config.spawn_anchor();
        debug!("spawn {} at ({}, {})", piece.kind().as_str(), x, y);
        self.active = Some(ActivePiece { piece, x, y });
    }

    /// Apply the highest-priority action in `input`
    pub fn apply_input(&mut self, input: InputState) -> InputOutcome {
        match input.primary_action() {
            Some(action) => self.apply_action(action),
            None => InputOutcome::Idle,
        }
    }

    pub fn apply_action(&mut self, action: Action) -> InputOutcome {
        if self.active.is_none() {
            return InputOutcome::Idle;
        }
        match action {
            Action::RotateRight => InputOutcome::Rotated(self.rotate(Turn::Right)),
            Action::RotateLeft => InputOutcome::Rotated(self.rotate(Turn::Left)),
            Action::MoveRight => InputOutcome::Shifted(self.shift(1, 0)),
            Action::MoveLeft => InputOutcome::Shifted(self.shift(-1, 0)),
            Action::SoftDrop => InputOutcome::SoftDrop,
        }
    }

    /// Rotate the falling piece through the kick protocol
    pub fn rotate(&mut self, turn: Turn) -> RotateOutcome {
        let Some(active) = self.active.as_mut() else {
            return RotateOutcome::Blocked;
        };
        let mut anchor = (active.x, active.y);
        let outcome = collision::rotate_with_kicks(&self.grid, &mut active.piece, &mut anchor, turn);
        (active.x, active.y) = anchor;
        outcome
    }

    /// Shift the falling piece; undone if it would collide
    pub fn shift(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let mut anchor = (active.x, active.y);
        let moved = collision::try_shift(&self.grid, &active.piece, &mut anchor, dx, dy);
        (active.x, active.y) = anchor;
        moved
    }

    /// Move the piece down one row, locking it (or restarting the session on
    /// a top-out) when it cannot move.
    pub fn gravity_tick(&mut self) -> TickOutcome {
        let Some(active) = self.active else {
            return TickOutcome::Idle;
        };

        if self.shift(0, -1) {
            return TickOutcome::Fell;
        }

        if active.y == self.config.spawn_anchor().1 {
            self.top_out();
            return TickOutcome::ToppedOut;
        }

        let rows_cleared = self.lock(active);
        TickOutcome::Locked { rows_cleared }
    }

    fn lock(&mut self, active: ActivePiece) -> usize {
        self.grid.merge_piece(&active.piece, active.x, active.y);
        self.active = None;
        self.pieces_locked = self.pieces_locked.saturating_add(1);

        let cleared = clear_full_rows(&mut self.grid);
        if cleared > 0 {
            self.rows_cleared = self.rows_cleared.saturating_add(cleared as u32);
            self.speed_up();
            info!(
                "cleared {} row(s), total {}, drop interval {}us",
                cleared, self.rows_cleared, self.drop_interval_us
            );
        } else {
            debug!(
                "locked {} at ({}, {})",
                active.piece.kind().as_str(),
                active.x,
                active.y
            );
        }
        cleared
    }

    fn speed_up(&mut self) {
        self.drop_interval_us = self
            .drop_interval_us
            .saturating_sub(self.config.drop_interval_decrement_us)
            .max(self.config.min_drop_interval_us);
    }

    fn top_out(&mut self) {
        info!(
            "top-out after {} piece(s) and {} row(s); restarting",
            self.pieces_locked, self.rows_cleared
        );
        self.grid.clear();
        self.active = None;
        self.drop_interval_us = self.config.start_drop_interval_us;
        self.rows_cleared = 0;
        self.pieces_locked = 0;
    }

    /// Rebuild and return the landed grid with the falling piece drawn in
    pub fn compose(&mut self) -> &Grid {
        match self.active {
            Some(active) => {
                self.grid
                    .compose_into(&active.piece, active.x, active.y, &mut self.composite)
            }
            None => self.composite.copy_from(&self.grid),
        }
        &self.composite
    }
}
