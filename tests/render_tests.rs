//! Render tests - grid to strip-ordered pixels, and on to TCL bytes

use led_tetris::core::{GameState, Grid, PieceKind};
use led_tetris::panel::tcl::{self, FRAME_BYTES};
use led_tetris::panel::{render, ColorLookup, FrameSink, PanelLayout, Palette, TclSink};
use led_tetris::term::PanelView;
use led_tetris::types::{ColorTag, Rgb, PANEL_LEDS};

const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);

#[test]
fn test_single_cell_lights_one_contiguous_block() {
    let mut grid = Grid::new(2, 2);
    grid.set(0, 0, ColorTag::RED);
    let layout = PanelLayout::new(4, 4, 2);

    let pixels = render(&grid, &layout, &Palette::standard());

    assert_eq!(pixels.len(), 16);
    let lit: Vec<usize> = (0..pixels.len()).filter(|&i| pixels[i] == RED).collect();
    // Panel rows 3 and 2 come first; row 1 runs backwards, row 0 forwards.
    assert_eq!(lit, vec![10, 11, 12, 13]);
    assert!(pixels
        .iter()
        .enumerate()
        .all(|(i, &p)| lit.contains(&i) || p == Rgb::BLACK));
}

#[test]
fn test_pixels_outside_grid_are_empty() {
    let mut grid = Grid::new(2, 2);
    for y in 0..2 {
        for x in 0..2 {
            grid.set(x, y, ColorTag::GREEN);
        }
    }
    // 3x3 cells worth of panel for a 2x2 grid.
    let layout = PanelLayout::new(6, 6, 2);
    let pixels = render(&grid, &layout, &Palette::standard());
    let green = Palette::standard().lookup(ColorTag::GREEN).unwrap();

    for (i, (row, col)) in layout.positions().enumerate() {
        let (x, y) = layout.cell_of(row, col);
        let expected = if x < 2 && y < 2 { green } else { Rgb::BLACK };
        assert_eq!(pixels[i], expected, "pixel {} (cell {}, {})", i, x, y);
    }
}

#[test]
fn test_unknown_tag_renders_as_empty() {
    let mut grid = Grid::new(1, 1);
    grid.set(0, 0, ColorTag('?'));
    let pixels = render(&grid, &PanelLayout::new(1, 1, 1), &Palette::standard());
    assert_eq!(pixels, vec![Rgb::BLACK]);
}

#[test]
fn test_standard_palette_covers_every_piece() {
    let palette = Palette::standard();
    assert!(palette
        .ensure_covers(PieceKind::ALL.iter().map(|k| k.color()))
        .is_ok());

    let mut partial = palette.clone();
    partial.remove(ColorTag::PURPLE);
    let err = partial
        .ensure_covers(PieceKind::ALL.iter().map(|k| k.color()))
        .unwrap_err();
    assert!(err.to_string().contains("'p'"));
}

#[test]
fn test_game_frame_reaches_device_as_tcl() {
    let mut game = GameState::new(5);
    game.spawn_kind(PieceKind::Z);
    let pixels = render(game.compose(), &PanelLayout::default(), &Palette::standard());
    assert_eq!(pixels.len(), PANEL_LEDS);

    let mut sink = TclSink::new(Vec::new());
    sink.send(&pixels).unwrap();
    let bytes = sink.into_inner();

    assert_eq!(bytes.len(), tcl::buffer_len(PANEL_LEDS));
    assert_eq!(&bytes[..FRAME_BYTES], &[0, 0, 0, 0]);
    assert!(bytes[bytes.len() - 2 * FRAME_BYTES..].iter().all(|&b| b == 0));

    // Four cells at k = 2 light sixteen pixels.
    let red_frame = [tcl::flag(RED), 0x00, 0x00, 0xff];
    let red_frames = bytes[FRAME_BYTES..bytes.len() - 2 * FRAME_BYTES]
        .chunks(FRAME_BYTES)
        .filter(|frame| *frame == red_frame)
        .count();
    assert_eq!(red_frames, 16);
}

#[test]
fn test_preview_undoes_the_serpentine() {
    let mut grid = Grid::new(2, 2);
    grid.set(0, 0, ColorTag::RED);
    let layout = PanelLayout::new(4, 4, 2);
    let pixels = render(&grid, &layout, &Palette::standard());

    let view = PanelView::new(layout);
    let mut canvas = view.canvas();
    view.paint(&pixels, &mut canvas).unwrap();

    // Bottom-left 2x2 block of a 4x4 picture, top row first.
    for sy in 0..4 {
        for sx in 0..4 {
            let lit = sx < 2 && sy >= 2;
            assert_eq!(canvas.pixel(sx, sy) == Some(RED), lit, "screen ({}, {})", sx, sy);
        }
    }
}
