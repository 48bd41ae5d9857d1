//! Geometry primitives and intersection tests
//!
//! Screen coordinates throughout: x grows right, y grows down.
//! Every predicate here is pure and defined for zero-radius circles and
//! zero-size rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A rectangle by top-left corner and size, optionally rotated about its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner (before rotation)
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation about the center, radians
    pub angle: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            angle: 0.0,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    (p1 - p2).length()
}

/// Convert degrees to radians
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Rotate `point` by `angle` radians around `pivot`
#[inline]
pub fn rotate_about(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - pivot;
    Vec2::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y) + pivot
}

/// Approximate circle vs axis-aligned rectangle test
///
/// True once the circle's bottom edge is past the rectangle's top edge and
/// the horizontal extents overlap. Only the top face is considered, which is
/// all the paddle needs.
pub fn circle_intersects_rect(circle: &Circle, rect: &Rect) -> bool {
    circle.center.y + circle.radius > rect.top()
        && circle.center.x + circle.radius > rect.left()
        && circle.center.x - circle.radius < rect.right()
}

/// Exact circle vs rotated rectangle test
///
/// Moves the circle center into the rectangle's unrotated frame, clamps it to
/// the rectangle to find the closest point, and compares that distance to the
/// radius.
pub fn circle_intersects_rotated_rect(circle: &Circle, rect: &Rect) -> bool {
    let local = if rect.angle == 0.0 {
        circle.center
    } else {
        rotate_about(circle.center, rect.center(), -rect.angle)
    };

    // max/min rather than clamp: tolerates negative sizes without panicking
    let closest = local
        .max(Vec2::new(rect.left(), rect.top()))
        .min(Vec2::new(rect.right(), rect.bottom()));

    distance(local, closest) < circle.radius
}
