//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape, Tetromino};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Color;

/// Side of the square NEXT preview box, in board cells
const PREVIEW_CELLS: u16 = 4;

const BOARD_BG: Color = Color::new(20, 20, 28);
const GRID_DOT: Color = Color::new(70, 70, 80);
const BORDER: Color = Color::new(200, 200, 200);
const SCREEN_BG: Color = Color::new(0, 0, 0);

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

/// Where the board frame landed in the last render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
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

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Frame (border included) of a board of this snapshot's size
    pub fn board_rect(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardRect {
        let w = (snap.board.width() as u16)
            .saturating_mul(self.cell_w)
            .saturating_add(2);
        let h = (snap.board.height() as u16)
            .saturating_mul(self.cell_h)
            .saturating_add(2);
        BoardRect {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::new(BORDER, SCREEN_BG),
        });

        let rect = self.board_rect(snap, viewport);

        fb.fill_rect(
            rect.x + 1,
            rect.y + 1,
            rect.w.saturating_sub(2),
            rect.h.saturating_sub(2),
            ' ',
            CellStyle::new(GRID_DOT, BOARD_BG),
        );
        self.draw_border(fb, rect, CellStyle::new(BORDER, SCREEN_BG));

        // Locked board cells.
        for (y, row) in snap.board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, rect, x as u16, y as u16, *color),
                    None => self.draw_empty_cell(fb, rect, x as u16, y as u16),
                }
            }
        }

        // Active piece; cells still above the board are not drawn.
        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                if x >= 0
                    && y >= 0
                    && (x as usize) < snap.board.width()
                    && (y as usize) < snap.board.height()
                {
                    self.draw_block(fb, rect, x as u16, y as u16, active.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, rect);

        if snap.game_over {
            fb.scrim_rect(rect.x, rect.y, rect.w, rect.h);
            self.draw_overlay_text(fb, rect, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, rect: BoardRect, style: CellStyle) {
        let BoardRect { x, y, w, h } = rect;
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, rect: BoardRect, x: u16, y: u16) {
        let (px, py) = self.cell_origin(rect, x, y);
        fb.put_char(px, py, '·', CellStyle::new(GRID_DOT, BOARD_BG));
    }

    /// One block: the last terminal column is a half glyph, which leaves a
    /// thin gap between neighbouring blocks.
    fn draw_block(&self, fb: &mut FrameBuffer, rect: BoardRect, x: u16, y: u16, color: Color) {
        let (px, py) = self.cell_origin(rect, x, y);
        self.paint_block(fb, px, py, color, BOARD_BG);
    }

    fn paint_block(&self, fb: &mut FrameBuffer, px: u16, py: u16, color: Color, bg: Color) {
        let style = CellStyle::new(color, bg);
        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                let ch = if self.cell_w > 1 && dx == self.cell_w - 1 {
                    '▌'
                } else {
                    '█'
                };
                fb.put_char(px.saturating_add(dx), py.saturating_add(dy), ch, style);
            }
        }
    }

    fn cell_origin(&self, rect: BoardRect, x: u16, y: u16) -> (u16, u16) {
        (
            rect.x.saturating_add(1).saturating_add(x.saturating_mul(self.cell_w)),
            rect.y.saturating_add(1).saturating_add(y.saturating_mul(self.cell_h)),
        )
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        rect: BoardRect,
    ) {
        let panel_x = rect.x.saturating_add(rect.w).saturating_add(2);
        let preview_w = PREVIEW_CELLS * self.cell_w;
        if panel_x.saturating_add(preview_w.max(8)) > viewport.width {
            return;
        }

        let label = CellStyle::new(Color::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Color::new(200, 200, 200), SCREEN_BG);

        let mut y = rect.y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next);
        }
    }

    /// Next piece centered in a PREVIEW_CELLS x PREVIEW_CELLS box
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Tetromino) {
        let shape: &Shape = &piece.shape;
        let pad_x = (PREVIEW_CELLS.saturating_sub(shape.width() as u16) * self.cell_w) / 2;
        let pad_y = (PREVIEW_CELLS.saturating_sub(shape.height() as u16) * self.cell_h) / 2;
        for (dx, dy) in shape.cells() {
            let px = x + pad_x + dx as u16 * self.cell_w;
            let py = y + pad_y + dy as u16 * self.cell_h;
            self.paint_block(fb, px, py, piece.color, SCREEN_BG);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, rect: BoardRect, text: &str) {
        let mid_y = rect.y.saturating_add(rect.h / 2);
        let text_w = text.chars().count() as u16;
        let x = rect.x.saturating_add(rect.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Color::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
