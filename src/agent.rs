//! Kinematic agent state and its visibility contract
//!
//! An agent is a plain state record. Steering policy (seek, separation) and
//! drawing live in the host; this module only integrates forces and turns the
//! agent's pose into a visibility query.

use serde::{Deserialize, Serialize};

use crate::core::types::{Segment, Vec2};
use crate::visibility::query::{VisibilityQuery, VisibilityResult, DEFAULT_ARC_RAYS_PER_TURN};

/// Field of view for a freshly created agent (90 degrees)
pub const DEFAULT_SWEEP: f64 = std::f64::consts::FRAC_PI_2;

/// Speed limit for a freshly created agent, per step
pub const DEFAULT_MAX_SPEED: f64 = 1.0;

/// Steering force limit for a freshly created agent
pub const DEFAULT_MAX_FORCE: f64 = 0.3;

/// Position, motion and view cone of one agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Forces accumulated since the last step
    pub acceleration: Vec2,
    pub max_speed: f64,
    pub max_force: f64,
    /// View direction; follows the velocity while moving, holds when stopped
    pub facing: f64,
    /// Field of view (radians)
    pub sweep: f64,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
            facing: 0.0,
            sweep: DEFAULT_SWEEP,
        }
    }
}

impl AgentState {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_sweep(mut self, sweep: f64) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Accumulate a force for the next step
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Accumulate a steering force, clamped to `max_force`
    pub fn apply_steering(&mut self, force: Vec2) {
        self.apply_force(force.limit(self.max_force));
    }

    /// Advance one step: velocity picks up the accumulated force and is
    /// clamped to `max_speed`, then moves the agent. Forces are cleared.
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;

        if !self.velocity.is_zero() {
            self.facing = self.velocity.heading();
        }
    }

    /// Visibility query for the agent's current pose
    pub fn visibility_query<'a>(&self, occluders: &'a [Segment], max_range: f64) -> VisibilityQuery<'a> {
        VisibilityQuery {
            origin: self.position,
            facing: self.facing,
            sweep: self.sweep,
            max_range,
            occluders,
            arc_rays_per_turn: DEFAULT_ARC_RAYS_PER_TURN,
        }
    }
}

/// Mean visible point, the target a wandering agent steers toward
pub fn average_visible_point(result: &VisibilityResult) -> Option<Vec2> {
    result.average_point()
}
