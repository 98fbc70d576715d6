//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Magnitudes at or below this are treated as zero
pub const MAGNITUDE_EPSILON: f64 = 1e-12;

/// 2D position or direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians)
    pub fn from_angle(angle: f64) -> Self {
        Self { x: angle.cos(), y: angle.sin() }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Heading angle, `atan2(y, x)`
    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn is_zero(&self) -> bool {
        self.length() <= MAGNITUDE_EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Unit vector in the same direction, or `None` for a zero vector
    pub fn try_normalize(&self) -> Option<Self> {
        let len = self.length();
        if len > MAGNITUDE_EPSILON {
            Some(Self { x: self.x / len, y: self.y / len })
        } else {
            None
        }
    }

    /// Unit vector in the same direction. A zero vector stays zero.
    pub fn normalize(&self) -> Self {
        self.try_normalize().unwrap_or_default()
    }

    /// Clamp the magnitude to at most `max`
    pub fn limit(&self, max: f64) -> Self {
        let len = self.length();
        if len > max && len > MAGNITUDE_EPSILON {
            *self * (max / len)
        } else {
            *self
        }
    }

    /// Linear interpolation, `t = 0` is `self`, `t = 1` is `other`
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl From<Vec2> for geo::Coord<f64> {
    fn from(v: Vec2) -> Self {
        geo::Coord { x: v.x, y: v.y }
    }
}

/// One opaque wall edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Zero-length segments block nothing
    pub fn is_degenerate(&self) -> bool {
        self.direction().is_zero()
    }

    pub fn endpoints(&self) -> [Vec2; 2] {
        [self.start, self.end]
    }

    /// Point at parameter `t` along the segment
    pub fn point_at(&self, t: f64) -> Vec2 {
        self.start.lerp(&self.end, t)
    }
}

/// Where two segments cross
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Vec2,
    /// Parameter along the first segment
    pub t: f64,
    /// Parameter along the second segment
    pub s: f64,
}

/// Axis-aligned rectangle with `min < max` on both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// Build a rectangle, or `None` when it would be empty or inverted
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        if min_x < max_x && min_y < max_y {
            Some(Self { min_x, min_y, max_x, max_y })
        } else {
            None
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Length of the diagonal
    pub fn diagonal(&self) -> f64 {
        Vec2::new(self.width(), self.height()).length()
    }

    /// Bounding-box overlap. Shared edges and corners count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// True if `other` lies entirely inside (or on) this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Corners in wall order: north-west, north-east, south-east, south-west
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min_x, self.min_y),
            Vec2::new(self.max_x, self.min_y),
            Vec2::new(self.max_x, self.max_y),
            Vec2::new(self.min_x, self.max_y),
        ]
    }

    /// Closed polygon outline for renderers
    pub fn to_polygon(&self) -> geo::Polygon<f64> {
        let ring: Vec<geo::Coord<f64>> = self.corners().iter().map(|&c| c.into()).collect();
        geo::Polygon::new(geo::LineString::from(ring), vec![])
    }
}
