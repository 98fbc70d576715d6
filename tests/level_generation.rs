//! Integration tests for procedural level generation

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sightline::core::{LevelConfig, Rect, Vec2};
use sightline::spatial::snap_down;
use sightline::world::walls::{build_wall_segments, room_wall_counts};
use sightline::world::{generate_level, generate_level_with_rng, RoomPlacer, RoomRejection};

fn dense_config(seed: u64) -> LevelConfig {
    LevelConfig {
        min_x: 20.0,
        min_y: 20.0,
        max_x: 780.0,
        max_y: 580.0,
        cell_size: 20.0,
        max_room_width: 240.0,
        max_room_height: 240.0,
        room_iterations: 300,
        line_count: 10,
        seed,
    }
}

#[test]
fn test_grid_snapping_examples() {
    assert_eq!(snap_down(13.0, 20.0), 0.0);
    assert_eq!(snap_down(27.0, 20.0), 20.0);
}

#[test]
fn test_two_piece_wall() {
    let segments = build_wall_segments(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 2);
    assert_eq!(segments.len(), 2);
    let third = 100.0 / 3.0;
    for s in &segments {
        assert!((s.length() - third).abs() < 1e-9);
    }
    assert!((segments[0].end.x - 33.333_333).abs() < 1e-3);
    assert!((segments[1].start.x - 66.666_667).abs() < 1e-3);
}

#[test]
fn test_duplicate_room_rejected() {
    let bounds = Rect::new(0.0, 0.0, 1000.0, 1000.0).unwrap();
    let mut placer = RoomPlacer::new(bounds, 20.0);
    let raw_min = Vec2::new(105.0, 210.0);
    let raw_max = Vec2::new(290.0, 330.0);

    assert!(placer.try_place(raw_min, raw_max).is_ok());
    assert_eq!(
        placer.try_place(raw_min, raw_max),
        Err(RoomRejection::Overlapping)
    );
    assert_eq!(placer.accepted().len(), 1);
}

#[test]
fn test_generated_rooms_are_valid() {
    for seed in 0..20 {
        let level = generate_level(&dense_config(seed)).unwrap();
        for (i, a) in level.rooms.iter().enumerate() {
            assert!(a.width() > 0.0 && a.height() > 0.0);
            assert!(level.bounds.contains_rect(a), "seed {seed}: {a:?} out of bounds");
            // Corners sit on the grid
            for c in a.corners() {
                assert_eq!(snap_down(c.x, 20.0), c.x);
                assert_eq!(snap_down(c.y, 20.0), c.y);
            }
            for b in &level.rooms[i + 1..] {
                assert!(!a.intersects(b), "seed {seed}: {a:?} overlaps {b:?}");
            }
        }
    }
}

#[test]
fn test_rooms_never_exceed_attempts() {
    let config = dense_config(3).with_room_iterations(5);
    let level = generate_level(&config).unwrap();
    assert!(level.room_count() <= 5);
}

#[test]
fn test_no_zero_length_occluders() {
    for seed in 0..10 {
        let level = generate_level(&dense_config(seed)).unwrap();
        assert!(level.occluders.iter().all(|s| !s.is_degenerate()));
    }
}

#[test]
fn test_random_lines_inside_play_area() {
    let config = dense_config(11).with_room_iterations(0).with_line_count(50);
    let level = generate_level(&config).unwrap();
    assert_eq!(level.occluders.len(), 54);
    for line in &level.occluders[..50] {
        assert!(level.bounds.contains_point(line.start));
        assert!(level.bounds.contains_point(line.end));
    }
}

#[test]
fn test_level_from_toml_config() {
    let toml_str = r#"
        min_x = 0.0
        min_y = 0.0
        max_x = 400.0
        max_y = 400.0
        cell_size = 20.0
        room_iterations = 50
        line_count = 2
        seed = 9
    "#;
    let config = LevelConfig::from_toml_str(toml_str).unwrap();
    let a = generate_level(&config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let b = generate_level_with_rng(&config, &mut rng).unwrap();
    assert_eq!(a, b);
}

proptest! {
    #[test]
    fn prop_wall_pieces_have_equal_length(
        pieces in 1u32..12,
        x0 in -500.0f64..500.0,
        y0 in -500.0f64..500.0,
        x1 in -500.0f64..500.0,
        y1 in -500.0f64..500.0,
    ) {
        let start = Vec2::new(x0, y0);
        let end = Vec2::new(x1, y1);
        prop_assume!(start.distance(&end) > 1e-6);

        let segments = build_wall_segments(start, end, pieces);
        prop_assert_eq!(segments.len(), pieces as usize);

        let total = start.distance(&end);
        let piece = total / (2 * pieces - 1) as f64;
        for (i, s) in segments.iter().enumerate() {
            prop_assert!((s.length() - piece).abs() < 1e-6);
            // Piece i starts at interval 2i
            let expected_start = start.lerp(&end, (2 * i) as f64 / (2 * pieces - 1) as f64);
            prop_assert!(s.start.distance(&expected_start) < 1e-6);
        }
    }

    #[test]
    fn prop_room_counts_always_have_door(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let counts = room_wall_counts(&mut rng);
        prop_assert!(counts.iter().any(|&c| c >= 2));
        prop_assert!(counts.iter().all(|&c| (1..=4).contains(&c)));
    }

    #[test]
    fn prop_generated_rooms_disjoint(seed in any::<u64>()) {
        let level = generate_level(&dense_config(seed)).unwrap();
        for (i, a) in level.rooms.iter().enumerate() {
            prop_assert!(level.bounds.contains_rect(a));
            for b in &level.rooms[i + 1..] {
                prop_assert!(!a.intersects(b));
            }
        }
    }
}
