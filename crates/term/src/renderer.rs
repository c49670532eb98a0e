//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) clears the
//! screen and writes every row. After that only rows that differ from the
//! previous frame are rewritten. Style escapes are emitted only when a
//! component actually changes between consecutive cells.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    out: Vec<u8>,
    /// Frame currently on screen
    shown: FrameBuffer,
    /// False until something has been drawn (or after `invalidate`)
    shown_valid: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(16 * 1024),
            shown: FrameBuffer::new(0, 0),
            shown_valid: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.flush()
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        queue!(
            self.out,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint the whole screen.
    pub fn invalidate(&mut self) {
        self.shown_valid = false;
    }

    /// Put `fb` on screen, then swap it with the previously shown frame.
    ///
    /// After the call `fb` holds stale contents of the right size; the
    /// caller repaints it in place for the next frame.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let same_size = self.shown.width() == fb.width() && self.shown.height() == fb.height();

        self.out.clear();
        if self.shown_valid && same_size {
            encode_rows_into(fb, dirty_rows(&self.shown, fb), &mut self.out)?;
        } else {
            encode_full_into(fb, &mut self.out)?;
            self.shown.resize(fb.width(), fb.height());
        }
        self.flush()?;

        std::mem::swap(&mut self.shown, fb);
        self.shown_valid = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.out.is_empty() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&self.out)?;
            stdout.flush()?;
        }
        Ok(())
    }
}

/// Rows whose content differs between two frames.
///
/// Frames of different sizes report every row of `next`.
pub fn dirty_rows<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = u16> + 'a {
    let resized = prev.width() != next.width() || prev.height() != next.height();
    (0..next.height()).filter(move |&y| resized || prev.row(y) != next.row(y))
}

/// Clear the screen and encode every row of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    encode_rows_into(fb, 0..fb.height(), out)
}

/// Encode the given rows of `fb` into `out`. Nothing is written if `rows`
/// is empty.
pub fn encode_rows_into(
    fb: &FrameBuffer,
    rows: impl IntoIterator<Item = u16>,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut pen = Pen::default();
    for y in rows {
        queue!(out, cursor::MoveTo(0, y))?;
        for cell in fb.row(y) {
            pen.apply(out, cell.style)?;
            queue!(out, Print(cell.ch))?;
        }
    }
    pen.finish(out)
}

/// Tracks the terminal's current style so unchanged components are skipped.
#[derive(Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.current.replace(style);
        if prev == Some(style) {
            return Ok(());
        }

        // Bold and dim can only be turned off together (SGR 22), and the
        // reset also drops colors, so any attribute change restarts the pen.
        let attrs_changed = prev.map_or(true, |p| (p.bold, p.dim) != (style.bold, style.dim));
        if attrs_changed {
            queue!(out, SetAttribute(Attribute::Reset))?;
            if style.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            queue!(out, SetForegroundColor(color(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            queue!(out, SetBackgroundColor(color(style.bg)))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.current.is_some() {
            queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
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
