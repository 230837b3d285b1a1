//! Geometry primitives in logical (point) units

use serde::{Deserialize, Serialize};

/// A 2D vector, used for deltas, velocities and offsets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise absolute value
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Clamp each axis magnitude to `max`, preserving sign
    pub fn clamp_magnitude(self, max: f32) -> Self {
        Self::new(
            self.x.clamp(-max, max),
            self.y.clamp(-max, max),
        )
    }

    /// True when both components are within `epsilon` of `other`
    pub fn approx_eq(self, other: Vec2, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// A position in the container's local coordinate space
pub type Point = Vec2;

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle (left/top/right/bottom edges)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_clamp_magnitude() {
        let v = Vec2::new(500.0, -700.0);
        let clamped = v.clamp_magnitude(400.0);
        assert_eq!(clamped, Vec2::new(400.0, -400.0));

        // Within bounds is untouched
        let v = Vec2::new(100.0, -50.0);
        assert_eq!(v.clamp_magnitude(400.0), v);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10.0, 10.0, 100.0, 200.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(50.0, 150.0)));
        assert!(!r.contains(Point::new(100.0, 10.0))); // right edge exclusive
        assert!(!r.contains(Point::new(5.0, 50.0)));
    }

    #[test]
    fn test_vec2_approx_eq() {
        let a = Vec2::new(1.0, 2.0);
        assert!(a.approx_eq(Vec2::new(1.4, 2.4), 0.5));
        assert!(!a.approx_eq(Vec2::new(1.6, 2.0), 0.5));
    }
}
