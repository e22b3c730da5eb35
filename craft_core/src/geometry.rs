//! Screen-space points and axis-aligned rectangles.
//!
//! Overlap uses strict inequalities on every edge: two rectangles that merely
//! touch along an edge or at a corner do **not** intersect.

// ════════════════════════════════════════════════════════════════════════════
// Vec2
// ════════════════════════════════════════════════════════════════════════════

/// A 2-D point in screen pixels.  `x` grows rightward, `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rect
// ════════════════════════════════════════════════════════════════════════════

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True when the interiors of `self` and `other` overlap.
    ///
    /// Strict on every edge, so `Rect(100,0,50,50)` does not intersect
    /// `Rect(150,0,50,50)`.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True when `other` lies entirely inside `self` (edges may coincide).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(380.0, 50.0, 50.0, 50.0);
        let b = Rect::new(400.0, 60.0, 50.0, 50.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn edge_touching_is_not_a_collision() {
        // a ends exactly where b begins: 100 + 50 = 150 is not > 150.
        let a = Rect::new(100.0, 0.0, 50.0, 50.0);
        let b = Rect::new(150.0, 0.0, 50.0, 50.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn corner_touching_is_not_a_collision() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(50.0, 50.0, 50.0, 50.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn vertically_separated_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(0.0, 200.0, 50.0, 50.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn one_pixel_overlap_intersects() {
        let a = Rect::new(100.0, 0.0, 50.0, 50.0);
        let b = Rect::new(149.0, 0.0, 50.0, 50.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn contains_allows_coincident_edges() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(25.0, 25.0, 50.0, 50.0);
        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn center_is_midpoint() {
        let r = Rect::new(10.0, 20.0, 100.0, 100.0);
        assert_eq!(r.center(), Vec2::new(60.0, 70.0));
    }
}
