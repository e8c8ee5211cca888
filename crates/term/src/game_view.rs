//! GameView: draws a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so the layout is unit-tested directly.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{SessionPhase, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: Style = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const OVERLAY: Style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

const BLOCK: char = '█';
const GHOST: char = '░';
const DOT: char = '·';

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

/// Screen position of the well's top-left border corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellOrigin {
    pub x: u16,
    pub y: u16,
}

pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Where the well lands for a viewport (centered, clamped at 0).
    pub fn well_origin(&self, viewport: Viewport) -> WellOrigin {
        let (frame_w, frame_h) = self.frame_size();
        WellOrigin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        }
    }

    /// Render a snapshot into an existing framebuffer, resizing it to the
    /// viewport. Reusing one framebuffer across frames keeps this
    /// allocation-free.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Default::default());

        let origin = self.well_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();

        self.draw_border(fb, origin, frame_w, frame_h);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Some(color) => {
                        let style = Style::new(Rgb::from(*color), WELL_BG);
                        self.fill_cell(fb, origin, x, y, BLOCK, style);
                    }
                    None => {
                        let style = Style::new(Rgb::new(90, 90, 100), WELL_BG).dim();
                        self.fill_cell(fb, origin, x, y, DOT, style);
                    }
                }
            }
        }

        if let (Some(current), Some(ghost_y)) = (snap.current, snap.ghost_y) {
            if ghost_y != current.y {
                let ghost = Piece { y: ghost_y, ..current };
                let style = Style::new(Rgb::from(current.color).scaled(2, 3), WELL_BG).dim();
                self.draw_piece(fb, origin, &ghost, GHOST, style);
            }
        }

        if let Some(current) = snap.current {
            let style = Style::new(Rgb::from(current.color), WELL_BG).bold();
            self.draw_piece(fb, origin, &current, BLOCK, style);
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        match snap.phase {
            SessionPhase::Idle => self.draw_overlay(fb, origin, frame_w, frame_h, 0, "PRESS ENTER"),
            SessionPhase::Paused => self.draw_overlay(fb, origin, frame_w, frame_h, 0, "PAUSED"),
            SessionPhase::GameOver => {
                self.draw_overlay(fb, origin, frame_w, frame_h, 0, "GAME OVER");
                let score = snap.final_score.unwrap_or(snap.score);
                self.draw_final_score(fb, origin, frame_w, frame_h, score);
            }
            SessionPhase::Running => {}
        }
    }

    /// Render into a freshly allocated framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, origin: WellOrigin, w: u16, h: u16) {
        let WellOrigin { x, y } = origin;
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(right, y, '┐', BORDER);
        fb.put_char(x, bottom, '└', BORDER);
        fb.put_char(right, bottom, '┘', BORDER);
        for cx in x + 1..right {
            fb.put_char(cx, y, '─', BORDER);
            fb.put_char(cx, bottom, '─', BORDER);
        }
        for cy in y + 1..bottom {
            fb.put_char(x, cy, '│', BORDER);
            fb.put_char(right, cy, '│', BORDER);
        }
    }

    /// Draw the visible cells of a piece; rows above the well are skipped.
    fn draw_piece(&self, fb: &mut FrameBuffer, origin: WellOrigin, piece: &Piece, ch: char, style: Style) {
        for (x, y) in piece.board_cells() {
            if (0..BOARD_WIDTH as i16).contains(&x) && (0..BOARD_HEIGHT as i16).contains(&y) {
                self.fill_cell(fb, origin, x as u16, y as u16, ch, style);
            }
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: WellOrigin,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: Style,
    ) {
        let px = origin.x + 1 + cell_x * self.cell_w;
        let py = origin.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: WellOrigin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) < 12 {
            return;
        }

        let mut y = origin.y;
        for (label, value) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_u32(panel_x, y + 1, value, VALUE);
            y += 3;
        }

        fb.put_str(panel_x, y, "SPEED", LABEL);
        fb.put_u32(panel_x, y + 1, snap.drop_interval_ms, VALUE);
        let digits = snap.drop_interval_ms.max(1).ilog10() as u16 + 1;
        fb.put_str(panel_x + digits, y + 1, "ms", VALUE);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", LABEL);
        y += 1;
        if let Some(next) = snap.next {
            let style = Style::new(Rgb::from(next.color), Rgb::new(0, 0, 0));
            for (r, c) in next.shape.cells() {
                fb.fill_rect(
                    panel_x + c as u16 * self.cell_w,
                    y + r as u16 * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                    BLOCK,
                    style,
                );
            }
        } else {
            fb.put_str(panel_x, y, "-", VALUE);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        origin: WellOrigin,
        frame_w: u16,
        frame_h: u16,
        row_offset: u16,
        text: &str,
    ) {
        let text_w = text.chars().count() as u16;
        let x = origin.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let y = origin.y.saturating_add(frame_h / 2).saturating_add(row_offset);
        fb.put_str(x, y, text, OVERLAY);
    }

    fn draw_final_score(
        &self,
        fb: &mut FrameBuffer,
        origin: WellOrigin,
        frame_w: u16,
        frame_h: u16,
        score: u32,
    ) {
        let digits = score.max(1).ilog10() as u16 + 1;
        let text_w = 6 + digits;
        let x = origin.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let y = origin.y.saturating_add(frame_h / 2).saturating_add(1);
        fb.put_str(x, y, "SCORE ", OVERLAY);
        fb.put_u32(x + 6, y, score, OVERLAY);
    }
}
