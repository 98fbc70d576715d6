//! Visibility polygons by brute-force ray casting

pub mod engine;
pub mod query;

pub use engine::{cast_ray, compute_visibility, compute_visibility_batch};
pub use query::{RaySample, VisibilityQuery, VisibilityResult};
