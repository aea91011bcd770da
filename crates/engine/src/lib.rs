//! Real-time engine - configuration, clock and the game loop
//!
//! - [`config`]: [`RunConfig`] from `LED_TETRIS_*` environment variables
//! - [`clock`]: the [`Clock`] seam ([`SystemClock`] for play, [`ManualClock`] for tests)
//! - [`runner`]: [`Runner`], which drives input, frames and gravity
//! - [`script`]: [`ScriptedInput`], replayed input for headless runs

pub mod clock;
pub mod config;
pub mod runner;
pub mod script;

pub use led_tetris_core as core;
pub use led_tetris_input as input;
pub use led_tetris_panel as panel;
pub use led_tetris_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{InputKind, RunConfig};
pub use runner::{Runner, Step};
pub use script::ScriptedInput;
