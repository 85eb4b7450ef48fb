//! World bounds rectangle for projectile culling and body clamping.

use crate::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned world rectangle.
///
/// The arena is an orthographic view: X spans `-aspect..aspect`, Y spans
/// `-1..1`. Projectiles are culled when they leave it; solid bodies are
/// clamped so they never leave it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum X coordinate
    pub min_x: f32,
    /// Minimum Y coordinate
    pub min_y: f32,
    /// Maximum X coordinate
    pub max_x: f32,
    /// Maximum Y coordinate
    pub max_y: f32,
}

impl Bounds {
    /// Creates new bounds.
    #[must_use]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates bounds centered on the origin with the given half-extents.
    #[must_use]
    pub const fn from_half_extents(half_width: f32, half_height: f32) -> Self {
        Self {
            min_x: -half_width,
            min_y: -half_height,
            max_x: half_width,
            max_y: half_height,
        }
    }

    /// Returns the width of the bounds.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Checks whether a point lies inside the bounds.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Checks whether a circle lies entirely inside the bounds.
    #[must_use]
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x - radius >= self.min_x
            && center.x + radius <= self.max_x
            && center.y - radius >= self.min_y
            && center.y + radius <= self.max_y
    }

    /// Clamps a circle's center so the circle stays inside the bounds.
    #[must_use]
    pub fn clamp_circle(&self, center: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            center.x.clamp(self.min_x + radius, self.max_x - radius),
            center.y.clamp(self.min_y + radius, self.max_y - radius),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Bounds {
        Bounds::from_half_extents(16.0 / 9.0, 1.0)
    }

    #[test]
    fn test_contains_point() {
        let b = arena();
        assert!(b.contains(Vec2::ZERO));
        assert!(b.contains(Vec2::new(1.7, 0.9)));
        assert!(!b.contains(Vec2::new(2.0, 0.0)));
        assert!(!b.contains(Vec2::new(0.0, -1.1)));
    }

    #[test]
    fn test_contains_circle() {
        let b = arena();
        assert!(b.contains_circle(Vec2::ZERO, 0.05));
        // Center inside but circle poking out of the top edge.
        assert!(!b.contains_circle(Vec2::new(0.0, 0.98), 0.05));
    }

    #[test]
    fn test_clamp_circle() {
        let b = arena();
        let clamped = b.clamp_circle(Vec2::new(5.0, -5.0), 0.05);
        assert!((clamped.x - (b.max_x - 0.05)).abs() < 1e-6);
        assert!((clamped.y - (b.min_y + 0.05)).abs() < 1e-6);

        // Already inside: unchanged.
        let inside = Vec2::new(0.3, 0.3);
        assert_eq!(b.clamp_circle(inside, 0.05), inside);
    }

    #[test]
    fn test_dimensions() {
        let b = Bounds::new(-2.0, -1.0, 2.0, 1.0);
        assert!((b.width() - 4.0).abs() < 1e-6);
        assert!((b.height() - 2.0).abs() < 1e-6);
    }
}
