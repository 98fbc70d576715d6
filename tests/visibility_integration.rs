//! Integration tests for visibility queries against generated and hand-built levels

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use sightline::agent::AgentState;
use sightline::core::{LevelConfig, Segment, SightError, Vec2};
use sightline::visibility::{cast_ray, compute_visibility, compute_visibility_batch, VisibilityQuery};
use sightline::world::generate_level;

fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
    Segment::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
}

fn square_room(size: f64) -> Vec<Segment> {
    vec![
        seg(0.0, 0.0, size, 0.0),
        seg(size, 0.0, size, size),
        seg(size, size, 0.0, size),
        seg(0.0, size, 0.0, 0.0),
    ]
}

#[test]
fn test_ray_at_zero_hits_wall_midpoint() {
    let walls = vec![seg(100.0, 0.0, 100.0, 100.0)];
    let origin = Vec2::new(0.0, 50.0);
    let query = VisibilityQuery::new(origin, &walls, 1000.0).with_cone(0.0, PI);
    let result = compute_visibility(&query).unwrap();

    let ray = result.ray_at(0.0).expect("a ray straight ahead");
    assert!(ray.blocked);
    assert!(ray.point.distance(&Vec2::new(100.0, 50.0)) < 1e-9);

    let direct = cast_ray(origin, 0.0, 1000.0, &walls);
    assert_eq!(direct.point, ray.point);
}

#[test]
fn test_full_circle_square_room_corners() {
    let walls = square_room(200.0);
    let query = VisibilityQuery::new(Vec2::new(100.0, 100.0), &walls, 1000.0);
    let result = compute_visibility(&query).unwrap();

    let expected = [
        Vec2::new(0.0, 0.0),
        Vec2::new(200.0, 0.0),
        Vec2::new(200.0, 200.0),
        Vec2::new(0.0, 200.0),
    ];
    assert_eq!(result.points.len(), 4);
    for (p, e) in result.points.iter().zip(expected) {
        assert!(p.distance(&e) < 1e-6, "{p:?} != {e:?}");
    }
}

#[test]
fn test_empty_occluders_reach_max_range() {
    let origin = Vec2::new(10.0, -20.0);
    for (facing, sweep) in [(0.0, FRAC_PI_2), (PI, PI), (1.0, TAU)] {
        let query = VisibilityQuery::new(origin, &[], 300.0).with_cone(facing, sweep);
        let result = compute_visibility(&query).unwrap();
        assert!(!result.rays.is_empty());
        for ray in &result.rays {
            assert!(!ray.blocked);
            assert!((ray.point.distance(&origin) - 300.0).abs() < 1e-9);
        }
        for p in &result.points {
            assert!((p.distance(&origin) - 300.0).abs() < 1e-9);
        }
        for pair in result.rays.windows(2) {
            assert!(pair[0].angle < pair[1].angle);
        }
    }
}

#[test]
fn test_cone_rays_span_sweep() {
    let query = VisibilityQuery::new(Vec2::ZERO, &[], 100.0).with_cone(PI, FRAC_PI_2);
    let result = compute_visibility(&query).unwrap();
    let first = result.rays.first().unwrap().angle;
    let last = result.rays.last().unwrap().angle;
    assert!((first - (PI - FRAC_PI_2 / 2.0)).abs() < 1e-12);
    assert!((last - first - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn test_queries_are_idempotent() {
    let level = generate_level(&LevelConfig::default().with_seed(5)).unwrap();
    let origin = level.bounds.center();
    let query = VisibilityQuery::new(origin, &level.occluders, level.diagonal()).with_cone(0.3, 2.0);
    let a = compute_visibility(&query).unwrap();
    let b = compute_visibility(&query).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_visible_points_stay_inside_level() {
    let level = generate_level(&LevelConfig::default().with_seed(17)).unwrap();
    let origin = level.bounds.center();
    let query = VisibilityQuery::new(origin, &level.occluders, level.diagonal() * 2.0);
    let result = compute_visibility(&query).unwrap();

    // The outer walls enclose the play area, so nothing escapes it
    for ray in &result.rays {
        assert!(ray.blocked);
        let p = ray.point;
        assert!(p.x >= level.bounds.min_x - 1e-6 && p.x <= level.bounds.max_x + 1e-6);
        assert!(p.y >= level.bounds.min_y - 1e-6 && p.y <= level.bounds.max_y + 1e-6);
    }
    let area = result.area(origin);
    assert!(area > 0.0);
    assert!(area <= level.bounds.width() * level.bounds.height() + 1e-6);
}

#[test]
fn test_wall_hides_what_is_behind_it() {
    // Short wall in front, long wall behind it
    let walls = vec![seg(50.0, -10.0, 50.0, 10.0), seg(100.0, -100.0, 100.0, 100.0)];
    let query = VisibilityQuery::new(Vec2::ZERO, &walls, 500.0).with_cone(0.0, FRAC_PI_2);
    let result = compute_visibility(&query).unwrap();

    for ray in &result.rays {
        let dir = Vec2::from_angle(ray.angle);
        let y_at_50 = dir.y / dir.x * 50.0;
        if y_at_50.abs() < 10.0 - 1e-6 {
            assert!((ray.point.x - 50.0).abs() < 1e-9);
        } else if y_at_50.abs() > 10.0 + 1e-6 {
            assert!((ray.point.x - 100.0).abs() < 1e-9);
        }
    }

    // Side rays just past the short wall's corner reach the far wall
    let past_corner = result
        .rays
        .iter()
        .filter(|r| r.point.x > 99.0 && r.point.y.abs() < 21.0)
        .count();
    assert_eq!(past_corner, 2);
}

#[test]
fn test_batch_for_agents() {
    let level = generate_level(&LevelConfig::default().with_seed(3)).unwrap();
    let agents: Vec<AgentState> = (0..8)
        .map(|i| {
            let mut a = AgentState::new(level.bounds.center() + Vec2::new(i as f64 * 10.0, 0.0));
            a.facing = i as f64;
            a
        })
        .collect();
    let queries: Vec<VisibilityQuery> = agents
        .iter()
        .map(|a| a.visibility_query(&level.occluders, level.diagonal()))
        .collect();

    let results = compute_visibility_batch(&queries);
    assert_eq!(results.len(), agents.len());
    for (query, result) in queries.iter().zip(results) {
        let result = result.unwrap();
        assert_eq!(result, compute_visibility(query).unwrap());
        assert!(result.average_point().is_some());
    }
}

#[test]
fn test_invalid_sweep_rejected() {
    let query = VisibilityQuery::new(Vec2::ZERO, &[], 100.0).with_cone(0.0, -0.5);
    let err = compute_visibility(&query).unwrap_err();
    assert!(matches!(err, SightError::ConfigurationOutOfRange { field: "sweep", .. }));
}
