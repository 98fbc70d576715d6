//! Visibility query input and result types

use std::f64::consts::TAU;

use geo::Area;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SightError};
use crate::core::types::{Segment, Vec2};

/// Evenly spaced rays per full turn, on top of the vertex rays
pub const DEFAULT_ARC_RAYS_PER_TURN: u32 = 64;

/// Sweeps within this of a full turn are treated as full-circle vision
pub const FULL_CIRCLE_EPSILON: f64 = 1e-9;

/// One visibility request against a borrowed occluder set
#[derive(Debug, Clone, Copy)]
pub struct VisibilityQuery<'a> {
    /// Point of view
    pub origin: Vec2,
    /// Facing direction (radians); ignored for full-circle sweeps
    pub facing: f64,
    /// Field of view centred on `facing`; `TAU` or more means all around
    pub sweep: f64,
    /// Rays stop at this distance when nothing blocks them
    pub max_range: f64,
    /// Walls that block line of sight
    pub occluders: &'a [Segment],
    /// Evenly spaced arc rays per full turn, scaled by the sweep; 0 disables
    pub arc_rays_per_turn: u32,
}

impl<'a> VisibilityQuery<'a> {
    /// Full-circle query from `origin`
    pub fn new(origin: Vec2, occluders: &'a [Segment], max_range: f64) -> Self {
        Self {
            origin,
            facing: 0.0,
            sweep: TAU,
            max_range,
            occluders,
            arc_rays_per_turn: DEFAULT_ARC_RAYS_PER_TURN,
        }
    }

    /// Restrict the query to a cone of `sweep` radians around `facing`
    pub fn with_cone(mut self, facing: f64, sweep: f64) -> Self {
        self.facing = facing;
        self.sweep = sweep;
        self
    }

    pub fn with_arc_rays(mut self, arc_rays_per_turn: u32) -> Self {
        self.arc_rays_per_turn = arc_rays_per_turn;
        self
    }

    pub fn is_full_circle(&self) -> bool {
        self.sweep >= TAU - FULL_CIRCLE_EPSILON
    }

    /// Reject queries that cannot describe a visible region
    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() {
            return Err(SightError::out_of_range(
                "origin",
                format!("({}, {}) is not finite", self.origin.x, self.origin.y),
            ));
        }
        if !self.facing.is_finite() {
            return Err(SightError::out_of_range("facing", format!("{} is not finite", self.facing)));
        }
        if !self.sweep.is_finite() || self.sweep <= 0.0 {
            return Err(SightError::out_of_range(
                "sweep",
                format!("{} must be positive", self.sweep),
            ));
        }
        if !self.max_range.is_finite() || self.max_range <= 0.0 {
            return Err(SightError::out_of_range(
                "max_range",
                format!("{} must be positive and finite", self.max_range),
            ));
        }
        Ok(())
    }
}

/// Where one cast ray stopped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaySample {
    /// Ray direction (radians)
    pub angle: f64,
    /// First occluder hit, or the range limit
    pub point: Vec2,
    /// True if an occluder stopped the ray
    pub blocked: bool,
}

/// Visible region from one query.
///
/// `rays` holds every cast ray in ascending angle order. `points` is the
/// region's boundary built from those rays with duplicate and collinear
/// points removed; it describes the same shape with fewer vertices. Neither
/// includes the origin: when the sweep is not a full circle the caller
/// closes the fan through the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityResult {
    pub points: Vec<Vec2>,
    pub rays: Vec<RaySample>,
    pub full_circle: bool,
}

impl VisibilityResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Ray cast at `angle`, if one was
    pub fn ray_at(&self, angle: f64) -> Option<&RaySample> {
        self.rays.iter().find(|r| (r.angle - angle).abs() <= 1e-12)
    }

    /// Mean of all ray end points, the usual steering target.
    /// `None` when no rays were cast.
    pub fn average_point(&self) -> Option<Vec2> {
        if self.rays.is_empty() {
            return None;
        }
        let sum = self
            .rays
            .iter()
            .fold(Vec2::ZERO, |acc, r| acc + r.point);
        Some(sum * (1.0 / self.rays.len() as f64))
    }

    /// Boundary as a polygon, closed through `origin` for partial sweeps
    pub fn to_polygon(&self, origin: Vec2) -> geo::Polygon<f64> {
        let mut ring: Vec<geo::Coord<f64>> = Vec::with_capacity(self.points.len() + 1);
        if !self.full_circle {
            ring.push(origin.into());
        }
        ring.extend(self.points.iter().map(|&p| geo::Coord::from(p)));
        geo::Polygon::new(geo::LineString::from(ring), vec![])
    }

    /// Visible area
    pub fn area(&self, origin: Vec2) -> f64 {
        self.to_polygon(origin).unsigned_area()
    }
}
