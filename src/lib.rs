//! LED Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benches can use `led_tetris::{core, panel, ...}`.

pub use led_tetris_core as core;
pub use led_tetris_engine as engine;
pub use led_tetris_input as input;
pub use led_tetris_panel as panel;
pub use led_tetris_term as term;
pub use led_tetris_types as types;
