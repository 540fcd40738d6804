//! Basic geometric types for diagram coordinates.
//!
//! Diagram space is an abstract 2D plane with `f64` coordinates; the
//! rendering collaborator decides how it maps to pixels or paper.

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// A position in diagram coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, offset: Vec2) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }
}

impl AddAssign<Vec2> for Point {
    fn add_assign(&mut self, offset: Vec2) {
        self.x += offset.x;
        self.y += offset.y;
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

/// A displacement in diagram coordinates, used for label offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// Creates a displacement from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the displacement.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_offset() {
        let p = Point::new(1.0, 2.0) + Vec2::new(0.5, -0.5);
        assert_approx_eq!(f64, p.x, 1.5);
        assert_approx_eq!(f64, p.y, 1.5);
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_approx_eq!(f64, a.distance_to(b), 5.0);
        assert_approx_eq!(f64, (b - a).length(), 5.0);
    }
}
