pub mod geometry;
pub mod grid;

pub use geometry::{segment_intersection, segment_intersection_with_tolerance};
pub use grid::snap_down;
