//! The player craft.
//!
//! `pos` anchors the 50×50 hitbox used for collision; the 100×100 sprite is
//! drawn centered on the hitbox so near-misses that graze the artwork don't
//! end the run.

use crate::geometry::{Rect, Vec2};

/// Drawn sprite size, pixels.
pub const CRAFT_RENDER_W: f32 = 100.0;
pub const CRAFT_RENDER_H: f32 = 100.0;

/// Logical hitbox size used for collision, pixels.
pub const CRAFT_HITBOX_W: f32 = 50.0;
pub const CRAFT_HITBOX_H: f32 = 50.0;

// ════════════════════════════════════════════════════════════════════════════
// PlayerCraft
// ════════════════════════════════════════════════════════════════════════════

/// The player-controlled craft.
///
/// Position is only ever written through the steering path while the game is
/// playing; on restart it returns to the default `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerCraft {
    pub pos: Vec2,
}

impl PlayerCraft {
    pub fn new(pos: Vec2) -> Self {
        PlayerCraft { pos }
    }

    /// Collision rectangle, anchored at `pos`.
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CRAFT_HITBOX_W, CRAFT_HITBOX_H)
    }

    /// Sprite rectangle: the render box shares its center with the hitbox.
    pub fn render_rect(&self) -> Rect {
        let c = self.hitbox().center();
        Rect::new(
            c.x - CRAFT_RENDER_W / 2.0,
            c.y - CRAFT_RENDER_H / 2.0,
            CRAFT_RENDER_W,
            CRAFT_RENDER_H,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_position_is_origin() {
        assert_eq!(PlayerCraft::default().pos, Vec2::ZERO);
    }

    #[test]
    fn hitbox_is_anchored_at_position() {
        let craft = PlayerCraft::new(Vec2::new(380.0, 50.0));
        let hb = craft.hitbox();
        assert_eq!((hb.x, hb.y), (380.0, 50.0));
        assert_eq!((hb.w, hb.h), (50.0, 50.0));
    }

    #[test]
    fn render_box_contains_and_centers_hitbox() {
        let craft = PlayerCraft::new(Vec2::new(200.0, 120.0));
        let hb = craft.hitbox();
        let rb = craft.render_rect();
        assert!(rb.contains(&hb));
        assert_eq!(rb.center(), hb.center());
        assert_eq!((rb.w, rb.h), (CRAFT_RENDER_W, CRAFT_RENDER_H));
    }
}
