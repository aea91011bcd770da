//! LED panel output.
//!
//! Turns a grid into the pixel sequence the panel's wiring expects and ships
//! it to the device:
//!
//! - [`palette`]: color-tag lookup
//! - [`mapper`]: expansion and serpentine ordering
//! - [`tcl`]: Total Control Lighting byte framing over any `Write`
//! - [`sink`]: the [`FrameSink`] seam plus device, fan-out and recording sinks

pub mod mapper;
pub mod palette;
pub mod sink;
pub mod tcl;

pub use led_tetris_core as core;
pub use led_tetris_types as types;

pub use mapper::{render, render_into, PanelLayout};
pub use palette::{ColorLookup, Palette};
pub use sink::{open_device, FanOut, FrameSink, RecordingSink};
pub use tcl::TclSink;
