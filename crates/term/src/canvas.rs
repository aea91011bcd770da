//! Pixel canvas shown two pixels per terminal cell.
//!
//! Terminal cells are roughly twice as tall as they are wide, so each cell
//! shows an upper half block: the foreground paints the upper pixel and the
//! background the lower one. A canvas with an odd height gets a black lower
//! half on its last terminal row.

use crate::types::Rgb;

/// The two pixels behind one terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HalfCell {
    pub upper: Rgb,
    pub lower: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    /// Row-major, top row first
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Terminal rows needed to show every pixel row
    pub fn term_rows(&self) -> usize {
        self.height.div_ceil(2)
    }

    pub fn same_shape(&self, other: &Canvas) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Paint one pixel; out-of-range writes are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Pixels behind terminal cell `(col, row)`
    pub fn cell(&self, col: usize, row: usize) -> Option<HalfCell> {
        let upper = self.pixel(col, 2 * row)?;
        let lower = self.pixel(col, 2 * row + 1).unwrap_or(Rgb::BLACK);
        Some(HalfCell { upper, lower })
    }
}
