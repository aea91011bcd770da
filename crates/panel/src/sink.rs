//! Frame transmission seam.
//!
//! The game hands each finished frame to a [`FrameSink`]. A sink either
//! delivers the whole frame or fails; there is no partial success.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
#[cfg(target_os = "linux")]
use spidev::{SpiModeFlags, Spidev, SpidevOptions};

use crate::tcl::TclSink;
use crate::types::Rgb;

pub trait FrameSink {
    /// Transmit one frame: one color per pixel, in strip order.
    fn send(&mut self, pixels: &[Rgb]) -> Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn send(&mut self, pixels: &[Rgb]) -> Result<()> {
        (**self).send(pixels)
    }
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn send(&mut self, pixels: &[Rgb]) -> Result<()> {
        (**self).send(pixels)
    }
}

/// SPI clock the TCL strip is driven at
pub const SPI_SPEED_HZ: u32 = 15_000_000;
pub const SPI_BITS_PER_WORD: u8 = 8;

/// Mode 0, 8-bit words, 15 MHz
#[cfg(target_os = "linux")]
pub fn spi_options() -> SpidevOptions {
    SpidevOptions::new()
        .bits_per_word(SPI_BITS_PER_WORD)
        .max_speed_hz(SPI_SPEED_HZ)
        .mode(SpiModeFlags::SPI_MODE_0)
        .build()
}

/// Open the spidev node, configure the bus for the strip and wrap it in a
/// TCL encoder. A device that refuses the bus settings is an error.
#[cfg(target_os = "linux")]
pub fn open_device(path: impl AsRef<Path>) -> Result<TclSink<Spidev>> {
    let path = path.as_ref();
    let mut spi =
        Spidev::open(path).with_context(|| format!("can't open LED device {}", path.display()))?;
    spi.configure(&spi_options())
        .with_context(|| format!("can't configure SPI on {}", path.display()))?;
    info!(
        "[Panel] streaming frames to {} at {} Hz",
        path.display(),
        SPI_SPEED_HZ
    );
    Ok(TclSink::new(spi))
}

#[cfg(not(target_os = "linux"))]
pub fn open_device(path: impl AsRef<Path>) -> Result<TclSink<std::fs::File>> {
    anyhow::bail!(
        "can't open LED device {}: spidev is only available on Linux",
        path.as_ref().display()
    )
}

/// Sends every frame to each inner sink in turn; the first failure wins.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Box<dyn FrameSink>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: Box<dyn FrameSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl FrameSink for FanOut {
    fn send(&mut self, pixels: &[Rgb]) -> Result<()> {
        for sink in &mut self.sinks {
            sink.send(pixels)?;
        }
        Ok(())
    }
}

/// Keeps every frame it receives. Useful for tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    frames: Vec<Vec<Rgb>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<Rgb>] {
        &self.frames
    }

    pub fn last(&self) -> Option<&[Rgb]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl FrameSink for RecordingSink {
    fn send(&mut self, pixels: &[Rgb]) -> Result<()> {
        self.frames.push(pixels.to_vec());
        Ok(())
    }
}
