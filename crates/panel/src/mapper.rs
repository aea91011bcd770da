//! Render mapper - grid cells to LEDs in wiring order
//!
//! The panel is one long strip folded into `rows` panel rows of `cols` pixels.
//! The strip starts at the last panel row and snakes back and forth:
//!
//! ```text
//! index 0 ->  row rows-1   (direction depends on parity)
//!             row rows-2   (opposite direction)
//!             ...
//!             row 0        (even rows run ascending, odd rows descending)
//! ```
//!
//! Each logical cell covers an `expand x expand` block of pixels. The pixel at
//! `(panel_row, panel_col)` shows grid cell `(panel_row / expand,
//! panel_col / expand)`, so panel rows run across grid columns and panel
//! columns run up grid rows.

use crate::core::Grid;
use crate::palette::ColorLookup;
use crate::types::{ColorTag, Rgb, EXPAND_FACTOR, PANEL_COLS, PANEL_ROWS};

/// Physical panel shape and the cell expansion factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    rows: usize,
    cols: usize,
    expand: usize,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            rows: PANEL_ROWS,
            cols: PANEL_COLS,
            expand: EXPAND_FACTOR,
        }
    }
}

impl PanelLayout {
    pub fn new(rows: usize, cols: usize, expand: usize) -> Self {
        assert!(expand > 0, "expansion factor must be positive");
        Self { rows, cols, expand }
    }

    /// Panel rows (strip folds)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pixels per panel row
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn expand(&self) -> usize {
        self.expand
    }

    /// Number of physical pixels
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(panel_row, panel_col)` of the pixel at strip position `index`
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.len() {
            return None;
        }
        let row = self.rows - 1 - index / self.cols;
        let step = index % self.cols;
        let col = if row % 2 == 0 {
            step
        } else {
            self.cols - 1 - step
        };
        Some((row, col))
    }

    /// Strip positions in wiring order, as `(panel_row, panel_col)`
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len()).filter_map(|i| self.position(i))
    }

    /// Logical cell shown by a pixel
    pub fn cell_of(&self, panel_row: usize, panel_col: usize) -> (usize, usize) {
        (panel_row / self.expand, panel_col / self.expand)
    }
}

/// Fill `out` with one color per pixel, in strip order.
///
/// Pixels outside the grid, and tags the lookup does not know, show the
/// `EMPTY` color.
pub fn render_into(
    grid: &Grid,
    layout: &PanelLayout,
    colors: &impl ColorLookup,
    out: &mut Vec<Rgb>,
) {
    let empty = colors.lookup(ColorTag::EMPTY).unwrap_or(Rgb::BLACK);
    out.clear();
    out.reserve(layout.len());

    for (row, col) in layout.positions() {
        let (x, y) = layout.cell_of(row, col);
        let color = if x < grid.width() && y < grid.height() {
            colors
                .lookup(grid.get(x as i32, y as i32))
                .unwrap_or(empty)
        } else {
            empty
        };
        out.push(color);
    }
}

/// Allocating variant of [`render_into`]
pub fn render(grid: &Grid, layout: &PanelLayout, colors: &impl ColorLookup) -> Vec<Rgb> {
    let mut out = Vec::with_capacity(layout.len());
    render_into(grid, layout, colors, &mut out);
    out
}
