//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and no I/O: no clock, no device, no
//! terminal. Given a seed and a sequence of inputs and gravity ticks it
//! always produces the same grid.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell matrix; out-of-range reads are empty
//! - [`pieces`]: the seven tetrominoes and their quarter-turn rotation
//! - [`collision`]: placement legality and the rotation kick list
//! - [`line_clear`]: full-row removal and compaction
//! - [`rng`]: seeded LCG for piece selection
//! - [`game_state`]: spawn / fall / lock / top-out state machine and drop speed
//!
//! # Example
//!
//! ```
//! use led_tetris_core::{GameState, TickOutcome};
//! use led_tetris_core::types::InputState;
//!
//! let mut game = GameState::new(12345);
//! game.ensure_piece();
//!
//! game.apply_input(InputState::MOVE_LEFT);
//! game.apply_input(InputState::ROTATE_RIGHT);
//! assert_eq!(game.gravity_tick(), TickOutcome::Fell);
//! ```

pub mod collision;
pub mod game_state;
pub mod grid;
pub mod line_clear;
pub mod pieces;
pub mod rng;

pub use led_tetris_types as types;

pub use collision::{overlaps, rotate_with_kicks, try_shift, RotateOutcome, Turn};
pub use game_state::{ActivePiece, GameConfig, GameState, InputOutcome, Phase, TickOutcome};
pub use grid::Grid;
pub use line_clear::clear_full_rows;
pub use pieces::{Piece, PieceKind, PieceShape};
pub use rng::SimpleRng;
