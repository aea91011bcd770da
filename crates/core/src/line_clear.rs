//! Line-clear module - full-row removal and compaction
//!
//! Rows are scanned from the floor upward with two cursors: `dst` walks every
//! row once, `src` runs ahead skipping full rows. Each destination row
//! receives the next surviving source row; once `src` passes the top the
//! remaining destination rows are blanked.

use crate::grid::Grid;

/// Remove every full row, drop the rows above into the gaps and return how
/// many rows were removed.
pub fn clear_full_rows(grid: &mut Grid) -> usize {
    let height = grid.height();
    let mut src = 0;
    let mut cleared = 0;

    for dst in 0..height {
        while grid.is_row_full(src) {
            src += 1;
            cleared += 1;
        }
        grid.copy_row(src, dst);
        src += 1;
    }

    cleared
}
