//! Terminal preview of the LED panel.
//!
//! Lets the game run on a development machine without the panel attached:
//! [`TerminalPanel`] accepts the same strip-ordered frames the device gets,
//! un-snakes them back into a [`Canvas`] and draws it with half-block glyphs
//! (two pixels per character cell) through a small diffing renderer.

pub mod canvas;
pub mod panel_view;
pub mod renderer;

pub use led_tetris_panel as panel;
pub use led_tetris_types as types;

pub use canvas::{Canvas, HalfCell};
pub use panel_view::{PanelView, TerminalPanel};
pub use renderer::TerminalRenderer;
