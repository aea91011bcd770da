//! Pieces module - tetromino shapes and rotation
//!
//! Every piece is four cell offsets around a pivot at `(0, 0)` plus a color
//! tag. Rotation is an exact quarter turn of those offsets about the pivot:
//!
//! - right: `(x, y) -> (y, -x)`
//! - left:  `(x, y) -> (-y, x)`
//!
//! There are no per-orientation shape tables; the falling piece carries its
//! current offsets and rotates them in place.

use crate::rng::SimpleRng;
use crate::types::ColorTag;

/// Offset of a single cell relative to the pivot
pub type CellOffset = (i32, i32);

/// The four cell offsets of a piece
pub type PieceShape = [CellOffset; 4];

/// The seven canonical shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Spawn-orientation offsets
    pub fn shape(self) -> PieceShape {
        match self {
            // Flat bar
            PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            // Backward L: hook up on the left
            PieceKind::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            PieceKind::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
            PieceKind::O => [(1, 1), (1, 0), (0, 0), (0, 1)],
            PieceKind::S => [(1, 1), (0, 1), (0, 0), (-1, 0)],
            PieceKind::T => [(1, 0), (0, 1), (0, 0), (-1, 0)],
            PieceKind::Z => [(-1, 0), (0, 0), (0, -1), (1, -1)],
        }
    }

    pub fn color(self) -> ColorTag {
        match self {
            PieceKind::I => ColorTag::CYAN,
            PieceKind::J => ColorTag::BLUE,
            PieceKind::L => ColorTag::ORANGE,
            PieceKind::O => ColorTag::YELLOW,
            PieceKind::S => ColorTag::GREEN,
            PieceKind::T => ColorTag::PURPLE,
            PieceKind::Z => ColorTag::RED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// A piece instance: color plus current offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: ColorTag,
    cells: PieceShape,
}

impl Piece {
    /// Fresh copy of a canonical shape in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            color: kind.color(),
            cells: kind.shape(),
        }
    }

    /// Copy of a uniformly chosen canonical shape
    pub fn random(rng: &mut SimpleRng) -> Self {
        let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
        Self::new(PieceKind::ALL[idx])
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> ColorTag {
        self.color
    }

    pub fn cells(&self) -> &PieceShape {
        &self.cells
    }

    /// Absolute cell coordinates with the pivot at `(xoff, yoff)`
    pub fn cells_at(&self, xoff: i32, yoff: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().map(move |&(dx, dy)| (xoff + dx, yoff + dy))
    }

    pub fn rotate_right(&mut self) {
        for cell in &mut self.cells {
            let (x, y) = *cell;
            *cell = (y, -x);
        }
    }

    pub fn rotate_left(&mut self) {
        for cell in &mut self.cells {
            let (x, y) = *cell;
            *cell = (-y, x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_right_single_cell() {
        let mut piece = Piece::new(PieceKind::I);
        piece.rotate_right();
        assert_eq!(piece.cells(), &[(0, 1), (0, 0), (0, -1), (0, -2)]);
    }

    #[test]
    fn test_rotate_left_single_cell() {
        let mut piece = Piece::new(PieceKind::I);
        piece.rotate_left();
        assert_eq!(piece.cells(), &[(0, -1), (0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_random_piece_uses_canonical_shape() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..50 {
            let piece = Piece::random(&mut rng);
            assert_eq!(piece.cells(), &piece.kind().shape());
            assert_eq!(piece.color(), piece.kind().color());
        }
    }
}
