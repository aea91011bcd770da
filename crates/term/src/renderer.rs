//! Flushes a canvas to the real terminal.
//!
//! The first canvas (and any canvas of a new shape) is a full redraw; later
//! ones only rewrite runs of cells whose pixels changed. Commands are queued
//! into a byte buffer and written with a single `write_all`.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, HalfCell};
use crate::types::Rgb;

const UPPER_HALF: char = '▀';

pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<Canvas>,
    buf: Vec<u8>,
    active: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(32 * 1024),
            active: false,
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        self.buf.clear();
        match self.shown.as_mut() {
            Some(shown) if shown.same_shape(canvas) => {
                encode_diff_into(shown, canvas, &mut self.buf)?;
                shown.clone_from(canvas);
            }
            _ => {
                encode_full_into(canvas, &mut self.buf)?;
                self.shown = Some(canvas.clone());
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Tracks the colors last sent so runs of same-colored cells skip the
/// escape sequences.
#[derive(Default)]
struct Pen {
    current: Option<HalfCell>,
}

impl Pen {
    fn put(&mut self, out: &mut Vec<u8>, cell: HalfCell) -> Result<()> {
        if self.current != Some(cell) {
            out.queue(SetForegroundColor(color(cell.upper)))?;
            out.queue(SetBackgroundColor(color(cell.lower)))?;
            self.current = Some(cell);
        }
        out.queue(Print(UPPER_HALF))?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode a redraw of every cell into `out`.
pub fn encode_full_into(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for row in 0..canvas.term_rows() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        for col in 0..canvas.width() {
            pen.put(out, canvas.cell(col, row).unwrap_or_default())?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode only the cells that differ between two canvases of the same shape.
pub fn encode_diff_into(shown: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (row, start, end) in changed_runs(shown, next) {
        out.queue(cursor::MoveTo(start as u16, row as u16))?;
        for col in start..end {
            pen.put(out, next.cell(col, row).unwrap_or_default())?;
        }
    }
    if pen.current.is_some() {
        out.queue(ResetColor)?;
    }
    Ok(())
}

/// `(row, start_col, end_col)` for each horizontal run of changed cells
fn changed_runs(shown: &Canvas, next: &Canvas) -> Vec<(usize, usize, usize)> {
    let mut runs = Vec::new();
    for row in 0..next.term_rows() {
        let mut start = None;
        for col in 0..=next.width() {
            let changed = col < next.width() && shown.cell(col, row) != next.cell(col, row);
            match (start, changed) {
                (None, true) => start = Some(col),
                (Some(s), false) => {
                    runs.push((row, s, col));
                    start = None;
                }
                _ => {}
            }
        }
    }
    runs
}
