//! Sightline - procedural occluder levels and line-of-sight polygons
//!
//! Generates a 2D map of wall segments (random lines, rooms with door gaps,
//! an outer boundary) and computes, for a point of view, the region visible
//! from it by casting rays against every wall.

pub mod agent;
pub mod core;
pub mod spatial;
pub mod visibility;
pub mod world;

pub use crate::core::{LevelConfig, Rect, Result, Segment, SightError, Vec2};
pub use crate::visibility::{compute_visibility, VisibilityQuery, VisibilityResult};
pub use crate::world::{generate_level, Level};
