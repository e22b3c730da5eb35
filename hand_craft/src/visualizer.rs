//! Software-rendered game view using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ SCORE 12          HAND DETECTED                              │
//! │                              ▒▒ obstacle (2× sprite)         │
//! │                                                              │
//! │                 ██ craft sprite (hitbox centered)            │
//! │                                                              │
//! │                     GAME OVER! overlay when ended            │
//! │ status line                                                  │
//! │ MOUSE=steer  R=restart  Q=quit                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The window doubles as the simulated camera: the mouse pointer position is
//! forwarded to the sim hand source every frame, and a pointer outside the
//! window reads as "no hand in frame".

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use std::sync::mpsc::Sender;

use craft_core::{Game, Obstacle, ObstacleKind};

use crate::hand::SimPointer;

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR: u32 = 0xFF10182B;
const BAND_LINE: u32 = 0xFF1C2A47;
const CRAFT_COLOR: u32 = 0xFF4FD1C5;
const CRAFT_EDGE: u32 = 0xFFB2F5EA;
const HUD_TEXT: u32 = 0xFFEEEEEE;
const HUD_DIM: u32 = 0xFF8899AA;
const HAND_OK: u32 = 0xFF48BB78;
const GAME_OVER_RED: u32 = 0xFFF56565;
const STATUS_BG: u32 = 0xFF0B1120;

/// One fill color per obstacle sprite kind.
fn kind_color(kind: ObstacleKind) -> u32 {
    match kind {
        ObstacleKind::Boulder => 0xFF9A8C78,
        ObstacleKind::Shard   => 0xFFD69E2E,
        ObstacleKind::Cluster => 0xFF9F7AEA,
        ObstacleKind::Core    => 0xFFE25822,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

/// What the window input wants the app to do this frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub quit: bool,
    pub restart: bool,
}

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    w: usize,
    h: usize,
    sim_tx: Sender<SimPointer>,
}

impl Visualizer {
    pub fn new(screen_w: f32, screen_h: f32, sim_tx: Sender<SimPointer>) -> Result<Self, String> {
        let w = screen_w as usize;
        let h = screen_h as usize;
        let mut window = Window::new(
            "Hand Craft — steer with your finger",
            w,
            h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; w * h],
            w,
            h,
            sim_tx,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll keys and the pointer.  The pointer is forwarded to the sim hand
    /// source; keys come back to the caller as [`FrameInput`].
    pub fn poll_input(&mut self) -> FrameInput {
        let mut input = FrameInput::default();
        if !self.window.is_open() {
            input.quit = true;
            return input;
        }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            input.quit = true;
        }
        if self.window.is_key_pressed(Key::R, KeyRepeat::No) {
            input.restart = true;
        }

        // The pointer plays the finger; losing it is "no hand in frame".
        let pointer = match self.window.get_mouse_pos(MouseMode::Discard) {
            Some((mx, my)) => SimPointer::At { x: mx, y: my },
            None => SimPointer::Gone,
        };
        let _ = self.sim_tx.send(pointer);

        input
    }

    /// Render one frame from the read-only game surface.
    pub fn render(&mut self, game: &Game, hand_visible: bool, status: &str) {
        self.buf.fill(BG_COLOR);

        // ── Spawn-band divider ────────────────────────────────────────────
        let mid = self.w / 2;
        for y in (0..self.h).step_by(8) {
            self.set_pixel(mid, y, BAND_LINE);
            self.set_pixel(mid, y + 1, BAND_LINE);
        }

        // ── Obstacles (sprites at 2× logical size) ────────────────────────
        for o in game.obstacles() {
            self.draw_obstacle(o);
        }

        // ── Craft ─────────────────────────────────────────────────────────
        let craft = game.craft().render_rect();
        self.fill_rectf(craft.x, craft.y, craft.w, craft.h, CRAFT_COLOR);
        self.border_rectf(craft.x, craft.y, craft.w, craft.h, CRAFT_EDGE);

        // ── HUD ───────────────────────────────────────────────────────────
        self.draw_text(&format!("SCORE {}", game.score()), 12, 12, 3, HUD_TEXT);
        if hand_visible {
            self.draw_text("HAND DETECTED", 12, 34, 2, HAND_OK);
        } else {
            self.draw_text("NO HAND", 12, 34, 2, HUD_DIM);
        }

        if game.is_game_over() {
            self.draw_game_over(game);
        }

        // ── Status bar + key legend ───────────────────────────────────────
        let bar_y = self.h.saturating_sub(34);
        self.fill_rectf(0.0, bar_y as f32, self.w as f32, 34.0, STATUS_BG);
        self.draw_text(status, 10, bar_y + 4, 2, HUD_TEXT);
        self.draw_text("MOUSE=steer  R=restart  Q=quit", 10, bar_y + 20, 1, HUD_DIM);

        self.window.update_with_buffer(&self.buf, self.w, self.h).ok();
    }

    // ── Obstacle sprite ───────────────────────────────────────────────────

    fn draw_obstacle(&mut self, o: &Obstacle) {
        let r = o.render_rect();
        let color = kind_color(o.kind);
        self.fill_rectf(r.x, r.y, r.w, r.h, color);
        self.border_rectf(r.x, r.y, r.w, r.h, 0xFF000000);
        // Logical core drawn a shade darker, so the 2× halo reads as visual
        // padding rather than hittable area.
        let core = o.rect();
        self.fill_rectf(core.x, core.y, core.w, core.h, darken(color));
    }

    // ── Game-over overlay ─────────────────────────────────────────────────

    fn draw_game_over(&mut self, game: &Game) {
        let cx = self.w / 2;
        let cy = self.h / 2;
        self.fill_rectf(
            cx as f32 - 180.0,
            cy as f32 - 70.0,
            360.0,
            140.0,
            STATUS_BG,
        );
        let message = game.message().unwrap_or("Game Over!");
        self.draw_text_centered(message, cx, cy - 50, 4, GAME_OVER_RED);
        self.draw_text_centered(&format!("FINAL SCORE {}", game.score()), cx, cy - 10, 3, HUD_TEXT);
        self.draw_text_centered(&format!("DODGED {}", game.dodged()), cx, cy + 18, 2, HUD_DIM);
        self.draw_text_centered("PRESS R TO RESTART", cx, cy + 42, 2, HUD_TEXT);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rectf(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        let x0 = x.max(0.0) as usize;
        let y0 = y.max(0.0) as usize;
        let x1 = ((x + w).max(0.0) as usize).min(self.w);
        let y1 = ((y + h).max(0.0) as usize).min(self.h);
        for row in y0..y1 {
            for col in x0..x1 {
                self.buf[row * self.w + col] = color;
            }
        }
    }

    fn border_rectf(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        self.fill_rectf(x, y, w, 1.0, color);
        self.fill_rectf(x, y + h - 1.0, w, 1.0, color);
        self.fill_rectf(x, y, 1.0, h, color);
        self.fill_rectf(x + w - 1.0, y, 1.0, h, color);
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.w && y < self.h {
            self.buf[y * self.w + x] = color;
        }
    }

    /// 3×5 bitmap font, scaled up by integer factors for the HUD.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rectf(
                            (cx + col * scale) as f32,
                            (y + row * scale) as f32,
                            scale as f32,
                            scale as f32,
                            color,
                        );
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > self.w {
                break;
            }
        }
    }

    fn draw_text_centered(&mut self, text: &str, cx: usize, y: usize, scale: usize, color: u32) {
        let width = text.chars().count() * 4 * scale;
        let x = cx.saturating_sub(width / 2);
        self.draw_text(text, x, y, scale, color);
    }
}

fn darken(color: u32) -> u32 {
    let r = ((color >> 16) & 0xFF) * 3 / 4;
    let g = ((color >> 8) & 0xFF) * 3 / 4;
    let b = (color & 0xFF) * 3 / 4;
    0xFF000000 | (r << 16) | (g << 8) | b
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
