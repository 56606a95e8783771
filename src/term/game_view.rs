//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Phase, TileId, TileSnapshot};
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};

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

const TIMER_BAR_W: u16 = 24;

/// Renders the two tile columns, the HUD and the phase overlays.
pub struct GameView {
    /// Tile width in terminal columns, label clipped to fit.
    tile_w: u16,
    /// Rows between consecutive tiles in a column.
    row_step: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            tile_w: 24,
            row_step: 2,
        }
    }
}

impl GameView {
    pub fn new(tile_w: u16, row_step: u16) -> Self {
        Self { tile_w, row_step }
    }

    pub fn render(
        &self,
        snap: &GameSnapshot,
        focus: Option<TileId>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        self.draw_header(&mut fb, snap, viewport);
        self.draw_columns(&mut fb, snap, focus, viewport);

        match (snap.paused, snap.phase) {
            (true, _) => self.draw_overlay(&mut fb, viewport, "PAUSED", "p to resume, q to quit"),
            (false, Phase::GameOver) => {
                self.draw_overlay(&mut fb, viewport, "GAME OVER", "r to restart, q to quit")
            }
            (false, Phase::Victory) => {
                self.draw_overlay(&mut fb, viewport, "VICTORY", "r to restart, q to quit")
            }
            _ => {}
        }

        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::default();
        let dimmed = CellStyle {
            dim: true,
            ..CellStyle::default()
        };

        fb.put_str(1, 0, &snap.level_label, label);
        fb.put_str(
            1 + snap.level_label.chars().count() as u16 + 2,
            0,
            snap.modality.as_str(),
            dimmed,
        );

        // Score counts up via the eased display value.
        let score_text = format!("SCORE {:>6}", snap.display_score.ceil() as i64);
        let high_text = format!("BEST {:>7}", snap.high_score as i64);
        let right = viewport.width.saturating_sub(score_text.len() as u16 + 1);
        fb.put_str(right, 0, &score_text, label);
        let right = viewport.width.saturating_sub(high_text.len() as u16 + 1);
        fb.put_str(right, 1, &high_text, value);

        self.draw_timer_bar(fb, snap, 1, 1);

        let pairs_text = format!("pairs left {}", snap.pairs_remaining);
        fb.put_str(1, 2, &pairs_text, dimmed);
    }

    fn draw_timer_bar(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let filled = (snap.fill_ratio * TIMER_BAR_W as f32).round() as u16;
        let low = snap.fill_ratio < 0.25;
        let bar_style = CellStyle {
            fg: if low {
                Rgb::new(220, 80, 80)
            } else {
                Rgb::new(100, 220, 120)
            },
            ..CellStyle::default()
        };
        let empty_style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            dim: true,
            ..CellStyle::default()
        };

        fb.put_str(x, y, "TIME ", CellStyle::default());
        for i in 0..TIMER_BAR_W {
            let (ch, style) = if i < filled {
                ('█', bar_style)
            } else {
                ('░', empty_style)
            };
            fb.put_char(x + 5 + i, y, ch, style);
        }
    }

    fn draw_columns(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        focus: Option<TileId>,
        viewport: Viewport,
    ) {
        let top = 4u16;
        let left_x = 2u16;
        let right_x = (viewport.width / 2).max(left_x + self.tile_w + 2);

        for (i, tile) in snap.first_group.iter().enumerate() {
            let y = top + i as u16 * self.row_step;
            self.draw_tile(fb, left_x, y, tile, focus == Some(tile.id));
        }
        for (i, tile) in snap.second_group.iter().enumerate() {
            let y = top + i as u16 * self.row_step;
            self.draw_tile(fb, right_x, y, tile, focus == Some(tile.id));
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, tile: &TileSnapshot, focused: bool) {
        if !tile.active {
            // Matched tiles leave an empty outline behind.
            let ghost = CellStyle {
                fg: Rgb::new(70, 70, 80),
                dim: true,
                ..CellStyle::default()
            };
            fb.fill_rect(x, y, self.tile_w, 1, '·', ghost);
            return;
        }

        let mut style = CellStyle {
            fg: Rgb::new(210, 210, 210),
            bg: Rgb::new(30, 30, 40),
            ..CellStyle::default()
        };
        if tile.pending {
            style.fg = Rgb::new(240, 220, 80);
            style.bold = true;
        }
        if focused {
            style.bg = Rgb::new(60, 60, 110);
            style.bold = true;
        }

        fb.fill_rect(x, y, self.tile_w, 1, ' ', style);

        let label = if tile.sound {
            format!("♪ {}", tile.label)
        } else {
            tile.label.clone()
        };
        let max = self.tile_w.saturating_sub(2) as usize;
        let clipped: String = label.chars().take(max).collect();
        fb.put_str(x + 1, y, &clipped, style);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, viewport: Viewport, title: &str, hint: &str) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..CellStyle::default()
        };
        let hint_style = CellStyle {
            dim: true,
            ..CellStyle::default()
        };
        let mid_y = viewport.height / 2;
        let x = viewport.width.saturating_sub(title.chars().count() as u16) / 2;
        fb.put_str(x, mid_y, title, style);
        let x = viewport.width.saturating_sub(hint.chars().count() as u16) / 2;
        fb.put_str(x, mid_y + 1, hint, hint_style);
    }
}
