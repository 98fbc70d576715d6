//! Segment intersection and angle helpers
//!
//! Pure functions over [`Segment`] and [`Vec2`]; nothing here allocates or
//! fails. Parallel, collinear and zero-length inputs simply report no
//! intersection.

use std::f64::consts::{PI, TAU};

use crate::core::types::{Intersection, Segment, Vec2};

/// Sine of the smallest angle between two segments that still counts as crossing
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Intersect two segments, requiring both parameters to lie in `[0, 1]`.
///
/// Returns the crossing point with `t` measured along `a` and `s` along `b`.
pub fn segment_intersection(a: &Segment, b: &Segment) -> Option<Intersection> {
    segment_intersection_with_tolerance(a, b, 0.0)
}

/// Like [`segment_intersection`], but accepts parameters within
/// `[-tolerance, 1 + tolerance]`. Used where a ray aimed exactly at a shared
/// endpoint must not slip between two walls through rounding.
pub fn segment_intersection_with_tolerance(
    a: &Segment,
    b: &Segment,
    tolerance: f64,
) -> Option<Intersection> {
    let r = a.direction();
    let u = b.direction();
    let denom = r.cross(&u);

    // Scale-free parallel test; also rejects zero-length inputs
    if denom.abs() <= PARALLEL_EPSILON * r.length() * u.length() {
        return None;
    }

    let qp = b.start - a.start;
    let t = qp.cross(&u) / denom;
    let s = qp.cross(&r) / denom;

    let range = -tolerance..=1.0 + tolerance;
    if !range.contains(&t) || !range.contains(&s) {
        return None;
    }

    Some(Intersection {
        point: a.start + r * t,
        t,
        s,
    })
}

/// Wrap an angle into `[-PI, PI)`
pub fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Wrap an angle into `[0, TAU)`
pub fn wrap_positive(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Counter-clockwise offset from `start` to `angle`, in `[0, TAU)`
pub fn angle_offset(start: f64, angle: f64) -> f64 {
    wrap_positive(angle - start)
}

/// Angle of `point` as seen from `origin`
pub fn angle_from(origin: Vec2, point: Vec2) -> f64 {
    (point - origin).heading()
}
