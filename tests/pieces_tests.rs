//! Pieces tests - shapes, colors and the rotation laws

use led_tetris::core::{Piece, PieceKind, SimpleRng};
use led_tetris::types::ColorTag;

#[test]
fn test_every_shape_has_four_distinct_cells_around_the_pivot() {
    for kind in PieceKind::ALL {
        let shape = kind.shape();
        for (i, a) in shape.iter().enumerate() {
            for b in &shape[i + 1..] {
                assert_ne!(a, b, "{:?} repeats a cell", kind);
            }
        }
        assert!(shape.contains(&(0, 0)), "{:?} should include its pivot", kind);
    }
}

#[test]
fn test_piece_colors() {
    let expected = [
        (PieceKind::I, ColorTag::CYAN),
        (PieceKind::J, ColorTag::BLUE),
        (PieceKind::L, ColorTag::ORANGE),
        (PieceKind::O, ColorTag::YELLOW),
        (PieceKind::S, ColorTag::GREEN),
        (PieceKind::T, ColorTag::PURPLE),
        (PieceKind::Z, ColorTag::RED),
    ];
    for (kind, color) in expected {
        assert_eq!(Piece::new(kind).color(), color);
    }
}

#[test]
fn test_rotate_right_then_left_is_identity() {
    for kind in PieceKind::ALL {
        let original = Piece::new(kind);

        let mut piece = original;
        piece.rotate_right();
        piece.rotate_left();
        assert_eq!(piece, original, "{:?} right/left", kind);

        piece.rotate_left();
        piece.rotate_right();
        assert_eq!(piece, original, "{:?} left/right", kind);
    }
}

#[test]
fn test_four_quarter_turns_are_identity() {
    for kind in PieceKind::ALL {
        let original = Piece::new(kind);
        let mut piece = original;
        for _ in 0..4 {
            piece.rotate_right();
        }
        assert_eq!(piece, original);
    }
}

#[test]
fn test_t_rotation_right() {
    // T: (1,0) (0,1) (0,0) (-1,0); (x, y) -> (y, -x)
    let mut piece = Piece::new(PieceKind::T);
    piece.rotate_right();
    assert_eq!(piece.cells(), &[(0, -1), (1, 0), (0, 0), (0, 1)]);
}

#[test]
fn test_random_pieces_follow_the_seed() {
    let mut a = SimpleRng::new(2024);
    let mut b = SimpleRng::new(2024);
    let first: Vec<_> = (0..32).map(|_| Piece::random(&mut a).kind()).collect();
    let second: Vec<_> = (0..32).map(|_| Piece::random(&mut b).kind()).collect();
    assert_eq!(first, second);

    // 32 draws should not all be the same shape
    assert!(first.iter().any(|k| *k != first[0]));
}
