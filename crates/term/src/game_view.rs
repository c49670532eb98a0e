//! GameView: paints a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{preview_grid, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Pos, SHAPE_GRID};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Runner-side state the engine does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewFlags {
    pub paused: bool,
}

/// Lays out the board frame, pieces, side panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Top-left corner of the board frame plus its outer size.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        flags: ViewFlags,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let columns = u16::try_from(snap.columns.max(0)).unwrap_or(u16::MAX);
        let rows = u16::try_from(snap.rows.max(0)).unwrap_or(u16::MAX);
        let w = columns.saturating_mul(self.cell_w).saturating_add(2);
        let h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG);
        fb.fill_rect(frame.x.saturating_add(1), frame.y.saturating_add(1), w - 2, h - 2, ' ', bg);
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        for y in 0..snap.rows {
            for x in 0..snap.columns {
                let pos = Pos::new(x, y);
                match snap.cell(x, y) {
                    Some(kind) => self.draw_block(fb, frame, snap, pos, kind),
                    None => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
                        self.fill_board_cell(fb, frame, snap, pos, '·', dot);
                    }
                }
            }
        }

        if let Some(active) = &snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
                for pos in active.cells_at(ghost_y) {
                    self.fill_board_cell(fb, frame, snap, pos, '░', ghost);
                }
            }
            for &pos in &active.cells {
                self.draw_block(fb, frame, snap, pos, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if flags.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, flags: ViewFlags, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, flags, viewport, &mut fb);
        fb
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        pos: Pos,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(kind.rgb().into(), PLAYFIELD_BG).bold();
        self.fill_board_cell(fb, frame, snap, pos, '█', style);
    }

    /// Cells outside the visible board are skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        pos: Pos,
        ch: char,
        style: CellStyle,
    ) {
        if pos.x < 0 || pos.x >= snap.columns || pos.y < 0 || pos.y >= snap.rows {
            return;
        }
        let px = (pos.x as u16)
            .saturating_mul(self.cell_w)
            .saturating_add(frame.x.saturating_add(1));
        let py = (pos.y as u16)
            .saturating_mul(self.cell_h)
            .saturating_add(frame.y.saturating_add(1));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = self.draw_preview(fb, panel_x, y, snap.next, false);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(kind) => {
                y = self.draw_preview(fb, panel_x, y, kind, !snap.can_hold);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y = y.saturating_add(2);
            }
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
    }

    /// Draw the spawn orientation of `kind`, skipping empty grid rows.
    /// Returns the first row below the preview.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dim: bool) -> u16 {
        let mut style = CellStyle::new(kind.rgb().into(), PANEL_BG);
        if dim {
            style = style.dim();
        }
        let mut row_y = y;
        for row in preview_grid(kind).iter().filter(|row| row.contains(&true)) {
            for (col, _) in row.iter().enumerate().filter(|&(_, &filled)| filled) {
                let px = x.saturating_add(col as u16 * self.cell_w);
                fb.fill_rect(px, row_y, self.cell_w, 1, '█', style);
            }
            row_y = row_y.saturating_add(1);
        }
        debug_assert!(row_y - y <= SHAPE_GRID as u16);
        row_y
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}
