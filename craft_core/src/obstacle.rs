//! Falling obstacles: the field that advances and culls them, and the
//! interval spawner that creates them.
//!
//! Obstacles spawn just above the top edge in the right half of the screen,
//! fall straight down a fixed number of pixels per tick, and are removed the
//! moment they pass the bottom edge.

use rand::Rng;

use crate::geometry::Rect;
use crate::Millis;

/// Logical obstacle size used for collision, pixels.
pub const OBSTACLE_W: f32 = 50.0;
pub const OBSTACLE_H: f32 = 50.0;

/// Sprites are drawn at exactly twice the logical size.
pub const OBSTACLE_RENDER_SCALE: f32 = 2.0;

// ════════════════════════════════════════════════════════════════════════════
// ObstacleKind
// ════════════════════════════════════════════════════════════════════════════

/// Which of the four obstacle sprites to draw.  Purely cosmetic — every kind
/// shares the same logical size and motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ObstacleKind {
    Boulder = 0,
    Shard   = 1,
    Cluster = 2,
    Core    = 3,
}

impl ObstacleKind {
    pub const COUNT: u8 = 4;

    /// Stable sprite index 0–3.
    pub fn sprite_index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`sprite_index`](Self::sprite_index); indices wrap mod 4.
    pub fn from_index(i: u8) -> Self {
        match i % Self::COUNT {
            0 => ObstacleKind::Boulder,
            1 => ObstacleKind::Shard,
            2 => ObstacleKind::Cluster,
            _ => ObstacleKind::Core,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Obstacle
// ════════════════════════════════════════════════════════════════════════════

/// One falling obstacle.  `x` never changes after creation; `y` grows by the
/// fall step each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Collision rectangle (logical size).
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, OBSTACLE_W, OBSTACLE_H)
    }

    /// Sprite rectangle: 2× the logical size, same top-left anchor.
    pub fn render_rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            OBSTACLE_W * OBSTACLE_RENDER_SCALE,
            OBSTACLE_H * OBSTACLE_RENDER_SCALE,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ObstacleField
// ════════════════════════════════════════════════════════════════════════════

/// The live obstacle set, in creation order (stable render keys).
#[derive(Clone, Debug, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        ObstacleField::default()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Move every obstacle down by `step` pixels.
    pub fn advance(&mut self, step: f32) {
        for o in &mut self.obstacles {
            o.y += step;
        }
    }

    /// Remove every obstacle with `y >= screen_h`; returns how many left the
    /// screen.
    pub fn cull(&mut self, screen_h: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.y < screen_h);
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Spawner
// ════════════════════════════════════════════════════════════════════════════

/// Creates at most one obstacle per elapsed spawn interval.
///
/// The check is "has more than `interval_ms` passed since the last spawn" —
/// delayed ticks skip spawns rather than bursting to catch up, which keeps
/// difficulty pacing stable under load.  `last_spawn_ms` is an owned field so
/// restart semantics are explicit: [`re_arm`](Self::re_arm) restarts the
/// interval from the given instant.
#[derive(Clone, Debug)]
pub struct Spawner {
    interval_ms: Millis,
    last_spawn_ms: Millis,
}

impl Spawner {
    pub fn new(interval_ms: Millis) -> Self {
        Spawner {
            interval_ms,
            last_spawn_ms: 0,
        }
    }

    /// Restart the spawn interval from `now` (game start and restart).
    pub fn re_arm(&mut self, now: Millis) {
        self.last_spawn_ms = now;
    }

    /// Called once per tick while playing.  Spawns exactly one obstacle when
    /// the interval has elapsed, in the right half of the screen, just above
    /// the top edge.
    pub fn try_spawn<R: Rng>(&mut self, now: Millis, screen_w: f32, rng: &mut R) -> Option<Obstacle> {
        if now.saturating_sub(self.last_spawn_ms) <= self.interval_ms {
            return None;
        }
        self.last_spawn_ms = now;

        let left_limit = screen_w / 2.0;
        let right_limit = screen_w - OBSTACLE_W;
        let x = rng.gen_range(left_limit..right_limit);
        let kind = ObstacleKind::from_index(rng.gen_range(0..ObstacleKind::COUNT));

        Some(Obstacle {
            x,
            y: -OBSTACLE_H,
            kind,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
