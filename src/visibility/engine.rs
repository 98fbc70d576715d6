//! Brute-force visibility by ray casting
//!
//! Rays are cast from the origin toward every occluder endpoint inside the
//! field of view, plus a pair of rays just to either side of each endpoint so
//! the outline can continue past a corner or stop at it. Each ray is tested
//! against every occluder and stops at the nearest hit. Cost is
//! O(rays × occluders) per query.

use std::f64::consts::{PI, TAU};

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use tracing::trace;

use crate::core::error::Result;
use crate::core::types::{Segment, Vec2};
use crate::spatial::geometry::{angle_from, angle_offset, segment_intersection_with_tolerance};
use crate::visibility::query::{RaySample, VisibilityQuery, VisibilityResult};

/// Angular offset of the side rays cast around each occluder endpoint
pub const CORNER_EPSILON: f64 = 1e-4;

/// Slack on the occluder parameter so rays aimed at a shared corner still hit
pub const RAY_TOLERANCE: f64 = 1e-9;

/// Hits this close to the origin (as a fraction of the ray) are ignored
pub const SELF_HIT_EPSILON: f64 = 1e-9;

/// Ray angles closer than this are cast once
const ANGLE_MERGE_EPSILON: f64 = 1e-12;

/// Boundary points closer than this are merged
const POINT_MERGE_EPSILON: f64 = 1e-9;

/// Sine of the largest turn still treated as a straight line
const COLLINEAR_EPSILON: f64 = 1e-9;

/// Compute the visible region for one query.
///
/// Fails only when the query itself is out of range (non-positive sweep or
/// range, non-finite origin). Degenerate occluders are skipped.
pub fn compute_visibility(query: &VisibilityQuery<'_>) -> Result<VisibilityResult> {
    query.validate()?;

    let full_circle = query.is_full_circle();
    let (start, span) = if full_circle {
        (-PI, TAU)
    } else {
        (query.facing - query.sweep / 2.0, query.sweep)
    };

    let rays: Vec<RaySample> = ray_offsets(query, start, span, full_circle)
        .into_iter()
        .map(|offset| cast_ray(query.origin, start + offset, query.max_range, query.occluders))
        .collect();

    let boundary: Vec<Vec2> = rays.iter().map(|r| r.point).collect();
    let points = simplify_outline(&boundary, full_circle);

    trace!(
        rays = rays.len(),
        points = points.len(),
        occluders = query.occluders.len(),
        "Computed visibility"
    );

    Ok(VisibilityResult {
        points,
        rays,
        full_circle,
    })
}

/// Evaluate many queries in parallel. Queries only read their occluder
/// sets, so one immutable level can serve every agent at once.
pub fn compute_visibility_batch(queries: &[VisibilityQuery<'_>]) -> Vec<Result<VisibilityResult>> {
    queries.par_iter().map(compute_visibility).collect()
}

/// Cast a single ray and report where it stops
pub fn cast_ray(origin: Vec2, angle: f64, max_range: f64, occluders: &[Segment]) -> RaySample {
    let ray = Segment::new(origin, origin + Vec2::from_angle(angle) * max_range);

    let nearest = occluders
        .iter()
        .filter(|wall| !wall.is_degenerate())
        .filter_map(|wall| segment_intersection_with_tolerance(&ray, wall, RAY_TOLERANCE))
        .filter(|hit| hit.t > SELF_HIT_EPSILON)
        .map(|hit| hit.t)
        .min_by_key(|&t| OrderedFloat(t));

    match nearest {
        Some(t) => RaySample {
            angle,
            point: ray.point_at(t.min(1.0)),
            blocked: true,
        },
        None => RaySample {
            angle,
            point: ray.end,
            blocked: false,
        },
    }
}

/// Sorted, de-duplicated ray offsets from `start`, each in `[0, span]`
fn ray_offsets(query: &VisibilityQuery<'_>, start: f64, span: f64, full_circle: bool) -> Vec<f64> {
    let in_view = |offset: f64| full_circle || offset <= span;
    let mut offsets = Vec::new();

    for wall in query.occluders.iter().filter(|w| !w.is_degenerate()) {
        for endpoint in wall.endpoints() {
            if (endpoint - query.origin).is_zero() {
                continue;
            }
            let angle = angle_from(query.origin, endpoint);
            if !in_view(angle_offset(start, angle)) {
                continue;
            }
            for nudge in [-CORNER_EPSILON, 0.0, CORNER_EPSILON] {
                let offset = angle_offset(start, angle + nudge);
                if in_view(offset) {
                    offsets.push(offset);
                }
            }
        }
    }

    if !full_circle {
        offsets.push(0.0);
        offsets.push(span);
    }

    if query.arc_rays_per_turn > 0 {
        let steps = (query.arc_rays_per_turn as f64 * span / TAU).ceil().max(1.0) as u32;
        // A full turn's last step would repeat the first ray
        let last = if full_circle { steps - 1 } else { steps };
        offsets.extend((0..=last).map(|k| span * k as f64 / steps as f64));
    }

    offsets.sort_by_key(|&o| OrderedFloat(o));
    offsets.dedup_by(|a, b| (*a - *b).abs() <= ANGLE_MERGE_EPSILON);
    offsets
}

/// True if `b` lies on the straight path from `a` to `c`
fn is_redundant(a: Vec2, b: Vec2, c: Vec2) -> bool {
    let ab = b - a;
    let bc = c - b;
    let turn = ab.cross(&bc);
    turn.abs() <= COLLINEAR_EPSILON * ab.length() * bc.length() && ab.dot(&bc) > 0.0
}

/// Drop repeated points and points that sit on a straight run between their
/// neighbours. A closed outline also wraps from its last point to its first.
fn simplify_outline(points: &[Vec2], closed: bool) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::with_capacity(points.len());

    for &p in points {
        if out.last().is_some_and(|q| q.distance(&p) <= POINT_MERGE_EPSILON) {
            continue;
        }
        while out.len() >= 2 && is_redundant(out[out.len() - 2], out[out.len() - 1], p) {
            out.pop();
        }
        out.push(p);
    }

    if closed {
        while out.len() >= 3 {
            let n = out.len();
            if out[n - 1].distance(&out[0]) <= POINT_MERGE_EPSILON
                || is_redundant(out[n - 2], out[n - 1], out[0])
            {
                out.pop();
            } else if is_redundant(out[n - 1], out[0], out[1]) {
                out.remove(0);
            } else {
                break;
            }
        }
    }

    out
}
