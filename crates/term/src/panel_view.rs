//! Un-snaking strip frames back into a picture.
//!
//! Screen orientation follows the playfield: panel rows run left to right
//! (grid columns) and panel columns run bottom to top (grid rows), so the
//! panel origin lands in the bottom-left corner of the canvas.

use anyhow::{anyhow, Result};

use crate::canvas::Canvas;
use crate::panel::{FrameSink, PanelLayout};
use crate::renderer::TerminalRenderer;
use crate::types::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelView {
    layout: PanelLayout,
}

impl PanelView {
    pub fn new(layout: PanelLayout) -> Self {
        Self { layout }
    }

    /// A canvas the size of the panel
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.layout.rows(), self.layout.cols())
    }

    /// Paint a strip-ordered frame onto `canvas`.
    pub fn paint(&self, pixels: &[Rgb], canvas: &mut Canvas) -> Result<()> {
        if pixels.len() != self.layout.len() {
            return Err(anyhow!(
                "panel preview: frame has {} pixels, layout expects {}",
                pixels.len(),
                self.layout.len()
            ));
        }
        if canvas.width() != self.layout.rows() || canvas.height() != self.layout.cols() {
            *canvas = self.canvas();
        }

        let top = self.layout.cols().saturating_sub(1);
        for (&color, (row, col)) in pixels.iter().zip(self.layout.positions()) {
            canvas.set_pixel(row, top - col, color);
        }
        Ok(())
    }
}

/// Frame sink that mirrors the panel in the terminal. The terminal is
/// restored when it is dropped.
pub struct TerminalPanel {
    view: PanelView,
    canvas: Canvas,
    renderer: TerminalRenderer,
}

impl TerminalPanel {
    /// Take over the terminal (raw mode, alternate screen).
    pub fn open(layout: PanelLayout) -> Result<Self> {
        let view = PanelView::new(layout);
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        Ok(Self {
            view,
            canvas: view.canvas(),
            renderer,
        })
    }
}

impl FrameSink for TerminalPanel {
    fn send(&mut self, pixels: &[Rgb]) -> Result<()> {
        self.view.paint(pixels, &mut self.canvas)?;
        self.renderer.draw(&self.canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn strip(layout: &PanelLayout, lit: &[(usize, usize)]) -> Vec<Rgb> {
        layout
            .positions()
            .map(|pos| if lit.contains(&pos) { RED } else { Rgb::BLACK })
            .collect()
    }

    #[test]
    fn test_panel_origin_is_bottom_left() {
        let layout = PanelLayout::new(3, 4, 1);
        let view = PanelView::new(layout);
        let mut canvas = view.canvas();
        view.paint(&strip(&layout, &[(0, 0), (2, 3)]), &mut canvas).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (3, 4));
        assert_eq!(canvas.pixel(0, 3), Some(RED));
        assert_eq!(canvas.pixel(2, 0), Some(RED));
        let lit = (0..4)
            .flat_map(|y| (0..3).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(RED))
            .count();
        assert_eq!(lit, 2);
    }

    #[test]
    fn test_wrong_frame_length_is_an_error() {
        let view = PanelView::new(PanelLayout::new(3, 4, 1));
        let mut canvas = view.canvas();
        assert!(view.paint(&[Rgb::BLACK; 5], &mut canvas).is_err());
    }

    #[test]
    fn test_canvas_is_reshaped_to_the_panel() {
        let layout = PanelLayout::new(2, 2, 1);
        let view = PanelView::new(layout);
        let mut canvas = Canvas::new(0, 0);
        view.paint(&strip(&layout, &[(1, 0)]), &mut canvas).unwrap();

        assert_eq!(canvas.term_rows(), 1);
        let cell = canvas.cell(1, 0).unwrap();
        assert_eq!((cell.upper, cell.lower), (Rgb::BLACK, RED));
    }
}
