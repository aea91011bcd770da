//! Collision module - placement legality and rotation kicks
//!
//! A placement is illegal when a cell falls outside the side walls, below the
//! floor, or onto a landed cell. There is deliberately no ceiling check: rows
//! above the grid read as empty, so a piece may spawn or rotate partly above
//! the visible top.
//!
//! Rotations that collide are retried at a fixed list of nudged anchors
//! before being undone. The two lists mirror each other; they are not a
//! general kick system.

use crate::grid::Grid;
use crate::pieces::Piece;

/// Direction of a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Right,
    Left,
}

impl Turn {
    pub fn opposite(self) -> Self {
        match self {
            Turn::Right => Turn::Left,
            Turn::Left => Turn::Right,
        }
    }

    /// Anchor nudges tried in order after a colliding turn, relative to the
    /// anchor before the turn.
    pub fn kicks(self) -> &'static [(i32, i32); 4] {
        match self {
            Turn::Right => &RIGHT_KICKS,
            Turn::Left => &LEFT_KICKS,
        }
    }

    fn apply(self, piece: &mut Piece) {
        match self {
            Turn::Right => piece.rotate_right(),
            Turn::Left => piece.rotate_left(),
        }
    }
}

const RIGHT_KICKS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const LEFT_KICKS: [(i32, i32); 4] = [(1, 0), (0, -1), (0, 1), (-1, 0)];

/// True if the piece at `(xoff, yoff)` leaves the walls/floor or hits a
/// landed cell.
pub fn overlaps(grid: &Grid, piece: &Piece, xoff: i32, yoff: i32) -> bool {
    let width = grid.width() as i32;
    piece
        .cells_at(xoff, yoff)
        .any(|(x, y)| x < 0 || x >= width || y < 0 || !grid.get(x, y).is_empty())
}

/// Outcome of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// Turned in place
    Rotated,
    /// Turned after moving the anchor by this nudge
    Kicked((i32, i32)),
    /// Every position collided; piece and anchor untouched
    Blocked,
}

impl RotateOutcome {
    pub fn succeeded(self) -> bool {
        !matches!(self, RotateOutcome::Blocked)
    }
}

/// Rotate the piece in place, nudging the anchor through the kick list when
/// the new orientation collides.
///
/// On [`RotateOutcome::Blocked`] the piece is turned back and `anchor` is
/// left as it was.
pub fn rotate_with_kicks(
    grid: &Grid,
    piece: &mut Piece,
    anchor: &mut (i32, i32),
    turn: Turn,
) -> RotateOutcome {
    turn.apply(piece);

    let (x, y) = *anchor;
    if !overlaps(grid, piece, x, y) {
        return RotateOutcome::Rotated;
    }

    for &(dx, dy) in turn.kicks() {
        if !overlaps(grid, piece, x + dx, y + dy) {
            *anchor = (x + dx, y + dy);
            return RotateOutcome::Kicked((dx, dy));
        }
    }

    turn.opposite().apply(piece);
    RotateOutcome::Blocked
}

/// Shift the anchor by `(dx, dy)` unless the piece would collide there.
pub fn try_shift(grid: &Grid, piece: &Piece, anchor: &mut (i32, i32), dx: i32, dy: i32) -> bool {
    let (x, y) = (anchor.0 + dx, anchor.1 + dy);
    if overlaps(grid, piece, x, y) {
        return false;
    }
    *anchor = (x, y);
    true
}
