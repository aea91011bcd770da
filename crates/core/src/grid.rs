//! Grid module - the landed cell matrix
//!
//! The grid is a `width x height` array of color tags stored row-major in a
//! flat vector. Coordinates are `(x, y)` with `x` growing to the right and
//! `y` growing **upward**: row 0 is the floor.
//!
//! Every coordinate outside the rectangle reads as [`ColorTag::EMPTY`] and
//! writes there are dropped. Collision checks rely on this: rows above the
//! ceiling are always free, which gives freshly spawned pieces headroom.

use crate::pieces::Piece;
use crate::types::ColorTag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<ColorTag>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![ColorTag::EMPTY; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Cell at `(x, y)`, `EMPTY` when out of range
    pub fn get(&self, x: i32, y: i32) -> ColorTag {
        self.index(x, y)
            .map(|idx| self.cells[idx])
            .unwrap_or(ColorTag::EMPTY)
    }

    /// Overwrite the cell at `(x, y)`; out-of-range writes are ignored
    pub fn set(&mut self, x: i32, y: i32, tag: ColorTag) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = tag;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(ColorTag::EMPTY);
    }

    /// Cell-wise copy from a grid of identical dimensions.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn copy_from(&mut self, other: &Grid) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "grid dimensions must match"
        );
        self.cells.copy_from_slice(&other.cells);
    }

    /// Row `y` as a slice, or `None` past the edges
    pub fn row(&self, y: usize) -> Option<&[ColorTag]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| !cell.is_empty()))
            .unwrap_or(false)
    }

    /// Copy row `src` onto row `dst`, or blank `dst` when `src` is past the top
    pub(crate) fn copy_row(&mut self, src: usize, dst: usize) {
        if dst >= self.height {
            return;
        }
        let width = self.width;
        let dst_start = dst * width;
        if src < self.height {
            if src != dst {
                let src_start = src * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
            }
        } else {
            self.cells[dst_start..dst_start + width].fill(ColorTag::EMPTY);
        }
    }

    /// Write the piece's four cells at the given anchor
    pub fn merge_piece(&mut self, piece: &Piece, xoff: i32, yoff: i32) {
        for (x, y) in piece.cells_at(xoff, yoff) {
            self.set(x, y, piece.color());
        }
    }

    /// Rebuild `out` as this grid with the piece drawn on top
    pub fn compose_into(&self, piece: &Piece, xoff: i32, yoff: i32, out: &mut Grid) {
        out.copy_from(self);
        out.merge_piece(piece, xoff, yoff);
    }

    pub fn cells(&self) -> &[ColorTag] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Build a grid from text rows, **top row first**, one char per cell.
    ///
    /// `.` and `x` are empty; any other char is used as the tag.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (i, line) in rows.iter().enumerate() {
            let y = (height - 1 - i) as i32;
            for (x, ch) in line.chars().enumerate() {
                let tag = if ch == '.' { ColorTag::EMPTY } else { ColorTag(ch) };
                grid.set(x as i32, y, tag);
            }
        }
        grid
    }

    /// Inverse of [`Grid::from_rows`], with `.` for empty cells
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                self.row(y)
                    .unwrap_or(&[])
                    .iter()
                    .map(|c| if c.is_empty() { '.' } else { c.as_char() })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(12, 25);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(11, 0), Some(11));
        assert_eq!(grid.index(0, 1), Some(12));
        assert_eq!(grid.index(11, 24), Some(299));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(12, 0), None);
        assert_eq!(grid.index(0, 25), None);
    }

    #[test]
    fn test_copy_row_past_top_blanks_destination() {
        let mut grid = Grid::from_rows(&["ab", "cd"]);
        grid.copy_row(5, 0);
        assert_eq!(grid.to_rows(), vec!["ab", ".."]);
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = ["..r.", "gg..", "pppp"];
        let grid = Grid::from_rows(&rows);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(2, 2), ColorTag::RED);
        assert_eq!(grid.get(0, 0), ColorTag::PURPLE);
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    #[should_panic(expected = "grid dimensions must match")]
    fn test_copy_from_rejects_mismatched_dimensions() {
        let mut a = Grid::new(3, 3);
        let b = Grid::new(4, 3);
        a.copy_from(&b);
    }
}
