//! Grid snapping for generated geometry

use crate::core::types::Vec2;

/// Snap a coordinate down to the nearest lower multiple of `cell_size`.
///
/// Floors rather than rounds: 13 with cell 20 snaps to 0, 27 snaps to 20.
#[inline]
pub fn snap_down(value: f64, cell_size: f64) -> f64 {
    (value / cell_size).floor() * cell_size
}

/// Snap both coordinates of a point down to the grid
#[inline]
pub fn snap_point(point: Vec2, cell_size: f64) -> Vec2 {
    Vec2::new(snap_down(point.x, cell_size), snap_down(point.y, cell_size))
}

/// Grid cell containing a point
#[inline]
pub fn world_to_cell(point: Vec2, cell_size: f64) -> (i64, i64) {
    (
        (point.x / cell_size).floor() as i64,
        (point.y / cell_size).floor() as i64,
    )
}
