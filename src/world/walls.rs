//! Wall construction with door gaps
//!
//! A wall built from `k` pieces is cut into `2k - 1` equal intervals. Even
//! intervals are solid, odd intervals are left open as doors, so a wall has
//! `k` pieces and `k - 1` gaps.

use rand::Rng;

use crate::core::types::{Rect, Segment, Vec2};

/// Chance that a room wall gets extra pieces (and therefore doors)
pub const DOOR_CHANCE: f64 = 0.25;

/// Extra pieces are drawn uniformly from `0..MAX_EXTRA_PIECES`
pub const MAX_EXTRA_PIECES: u32 = 3;

/// Build the solid pieces of a wall from `start` to `end`.
///
/// Returns exactly `pieces` segments, each `length / (2 * pieces - 1)` long.
/// Zero pieces or a zero-length wall yields nothing.
pub fn build_wall_segments(start: Vec2, end: Vec2, pieces: u32) -> Vec<Segment> {
    if pieces == 0 || (end - start).is_zero() {
        return Vec::new();
    }

    let intervals = 2 * pieces - 1;
    let step = (end - start) * (1.0 / intervals as f64);

    (0..intervals)
        .step_by(2)
        .map(|i| {
            let a = start + step * i as f64;
            // Pin the last piece to the exact wall end
            let b = if i + 1 == intervals {
                end
            } else {
                start + step * (i + 1) as f64
            };
            Segment::new(a, b)
        })
        .collect()
}

/// Piece count for one room wall: 1, or with [`DOOR_CHANCE`] 1 plus 0..=2
pub fn random_wall_count<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let mut count = 1;
    if rng.gen::<f64>() < DOOR_CHANCE {
        count += rng.gen_range(0..MAX_EXTRA_PIECES);
    }
    count
}

/// Piece counts for the four walls of a room (north, east, south, west).
///
/// If no wall came out with a door, one wall chosen at random is forced to
/// two pieces so every room has an entrance.
pub fn room_wall_counts<R: Rng + ?Sized>(rng: &mut R) -> [u32; 4] {
    let mut counts = [
        random_wall_count(rng),
        random_wall_count(rng),
        random_wall_count(rng),
        random_wall_count(rng),
    ];

    if counts.iter().all(|&c| c <= 1) {
        counts[rng.gen_range(0..4)] = 2;
    }

    counts
}

/// Segments for a rectangle's four walls, in north, east, south, west order.
///
/// Walls run clockwise (in screen coordinates) around the rectangle.
pub fn rect_walls(rect: &Rect, counts: [u32; 4]) -> Vec<Segment> {
    let [nw, ne, se, sw] = rect.corners();
    let sides = [(nw, ne), (ne, se), (se, sw), (sw, nw)];

    sides
        .iter()
        .zip(counts)
        .flat_map(|(&(start, end), count)| build_wall_segments(start, end, count))
        .collect()
}

/// Walls of a generated room, with random door placement
pub fn build_room<R: Rng + ?Sized>(rect: &Rect, rng: &mut R) -> Vec<Segment> {
    let counts = room_wall_counts(rng);
    rect_walls(rect, counts)
}
