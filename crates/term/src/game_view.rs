//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Fixed colour of each piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::T => Rgb::new(128, 0, 128),
        PieceKind::Z => Rgb::new(255, 0, 0),
    }
}

/// Where the board frame sits inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the game.
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

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let frame_w = (BOARD_WIDTH as u16)
            .saturating_mul(self.cell_w)
            .saturating_add(2);
        let frame_h = (BOARD_HEIGHT as u16)
            .saturating_mul(self.cell_h)
            .saturating_add(2);
        let layout = Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        };

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(PLAYFIELD_BG, PLAYFIELD_BG),
        );
        self.draw_border(fb, layout);

        // Locked cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                match PieceKind::from_index(v) {
                    Some(kind) => self.draw_block(fb, layout, x as u16, y as u16, kind),
                    None => self.draw_empty(fb, layout, x as u16, y as u16),
                }
            }
        }

        // Active piece; cells above the board are not drawn.
        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.draw_block(fb, layout, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            self.draw_game_over(fb, layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout) {
        let Layout {
            start_x: x,
            start_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;
        let style = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

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

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(70, 70, 80), PLAYFIELD_BG);
        self.fill_cell(fb, layout, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAYFIELD_BG).bold();
        self.fill_cell(fb, layout, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = (layout.start_x + 1).saturating_add(x.saturating_mul(self.cell_w));
        let py = (layout.start_y + 1).saturating_add(y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let hint = CellStyle::new(Rgb::new(120, 120, 130), SCREEN_BG);

        let mut y = layout.start_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("SPEED", snap.drop_interval_ms),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }
        // SPEED is shown in milliseconds per row.
        fb.put_str(panel_x + digits(snap.drop_interval_ms) + 1, y - 2, "ms", hint);

        if let Some(active) = snap.active {
            fb.put_str(panel_x, y, "PIECE", label);
            fb.put_str(panel_x, y + 1, active.kind.letter(), value);
            y = y.saturating_add(3);
        }

        for line in ["←→ move", "↑  rotate", "↓  drop", "SPC slam", "Q  quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: Layout) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let banner = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let hint = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);

        // Blank band across the playfield behind the text.
        fb.fill_rect(layout.start_x + 1, mid_y - 1, layout.frame_w - 2, 3, ' ', hint);
        self.put_centered(fb, layout, mid_y - 1, "GAME OVER", banner);
        self.put_centered(fb, layout, mid_y + 1, "ENTER: restart", hint);
    }

    fn put_centered(&self, fb: &mut FrameBuffer, layout: Layout, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

fn digits(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
