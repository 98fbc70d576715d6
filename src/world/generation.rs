//! Procedural level generation
//!
//! A level is built in three passes, in draw order:
//! 1. free-floating random wall segments
//! 2. non-overlapping, grid-snapped rooms with door gaps
//! 3. the outer boundary of the play area
//!
//! Generation is deterministic for a given config and RNG stream. The
//! generator owns its random source for the duration of the call; nothing is
//! read from global state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::core::config::LevelConfig;
use crate::core::error::Result;
use crate::core::types::{Rect, Segment, Vec2};
use crate::spatial::grid::snap_down;
use crate::world::level::Level;
use crate::world::walls::{build_room, rect_walls};

/// Why a room candidate was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomRejection {
    /// Snapped width or height is zero
    Degenerate,
    /// Snapped rectangle leaves the play area
    OutOfBounds,
    /// Snapped rectangle touches or overlaps an accepted room
    Overlapping,
}

/// Tally of room placement attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomStats {
    pub attempts: u32,
    pub accepted: u32,
    pub degenerate: u32,
    pub out_of_bounds: u32,
    pub overlapping: u32,
}

impl RoomStats {
    fn record(&mut self, outcome: &std::result::Result<Rect, RoomRejection>) {
        self.attempts += 1;
        match outcome {
            Ok(_) => self.accepted += 1,
            Err(RoomRejection::Degenerate) => self.degenerate += 1,
            Err(RoomRejection::OutOfBounds) => self.out_of_bounds += 1,
            Err(RoomRejection::Overlapping) => self.overlapping += 1,
        }
    }
}

/// Accepted-room bookkeeping for the placement pass
#[derive(Debug, Clone)]
pub struct RoomPlacer {
    bounds: Rect,
    cell_size: f64,
    accepted: Vec<Rect>,
}

impl RoomPlacer {
    pub fn new(bounds: Rect, cell_size: f64) -> Self {
        Self {
            bounds,
            cell_size,
            accepted: Vec::new(),
        }
    }

    /// Snap a raw candidate to the grid and accept it if it is non-empty,
    /// inside the play area, and clear of every accepted room.
    pub fn try_place(
        &mut self,
        raw_min: Vec2,
        raw_max: Vec2,
    ) -> std::result::Result<Rect, RoomRejection> {
        let rect = Rect::new(
            snap_down(raw_min.x, self.cell_size),
            snap_down(raw_min.y, self.cell_size),
            snap_down(raw_max.x, self.cell_size),
            snap_down(raw_max.y, self.cell_size),
        )
        .ok_or(RoomRejection::Degenerate)?;

        if !self.bounds.contains_rect(&rect) {
            return Err(RoomRejection::OutOfBounds);
        }

        if self.accepted.iter().any(|other| other.intersects(&rect)) {
            return Err(RoomRejection::Overlapping);
        }

        self.accepted.push(rect);
        Ok(rect)
    }

    pub fn accepted(&self) -> &[Rect] {
        &self.accepted
    }

    pub fn into_rooms(self) -> Vec<Rect> {
        self.accepted
    }
}

/// Generate a level seeded from `config.seed`
pub fn generate_level(config: &LevelConfig) -> Result<Level> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    generate_level_with_rng(config, &mut rng)
}

/// Generate a level from an explicitly supplied random stream.
///
/// `config.seed` is ignored; the caller's stream decides the layout.
pub fn generate_level_with_rng<R: Rng + ?Sized>(config: &LevelConfig, rng: &mut R) -> Result<Level> {
    config.validate()?;
    let bounds = config.play_area()?;

    let mut occluders = random_lines(&bounds, config.line_count, rng);

    let (rooms, room_walls, stats) = place_rooms(config, &bounds, rng);
    occluders.extend(room_walls);

    occluders.extend(outer_walls(&bounds));

    debug!(
        seed = config.seed,
        occluders = occluders.len(),
        rooms = stats.accepted,
        attempts = stats.attempts,
        degenerate = stats.degenerate,
        out_of_bounds = stats.out_of_bounds,
        overlapping = stats.overlapping,
        "Generated level"
    );

    Ok(Level {
        bounds,
        occluders,
        rooms,
    })
}

/// `count` segments between uniformly sampled points in the play area.
/// Zero-length draws are dropped.
pub fn random_lines<R: Rng + ?Sized>(bounds: &Rect, count: u32, rng: &mut R) -> Vec<Segment> {
    (0..count)
        .filter_map(|_| {
            let start = random_point(bounds, rng);
            let end = random_point(bounds, rng);
            let line = Segment::new(start, end);
            (!line.is_degenerate()).then_some(line)
        })
        .collect()
}

/// Run `config.room_iterations` placement attempts.
///
/// Returns the accepted rooms, their walls, and the attempt tally. Running
/// out of attempts is normal and not an error.
pub fn place_rooms<R: Rng + ?Sized>(
    config: &LevelConfig,
    bounds: &Rect,
    rng: &mut R,
) -> (Vec<Rect>, Vec<Segment>, RoomStats) {
    let mut placer = RoomPlacer::new(*bounds, config.cell_size);
    let mut walls = Vec::new();
    let mut stats = RoomStats::default();

    for attempt in 0..config.room_iterations {
        let w = rng.gen::<f64>() * config.max_room_width;
        let h = rng.gen::<f64>() * config.max_room_height;
        let min = random_point(bounds, rng);
        let max = Vec2::new(min.x + w, min.y + h);

        let outcome = placer.try_place(min, max);
        stats.record(&outcome);

        match outcome {
            Ok(rect) => walls.extend(build_room(&rect, rng)),
            Err(reason) => trace!(attempt, ?reason, "Room candidate rejected"),
        }
    }

    (placer.into_rooms(), walls, stats)
}

/// North, east, south and west boundary walls, each a single solid piece
pub fn outer_walls(bounds: &Rect) -> Vec<Segment> {
    rect_walls(bounds, [1, 1, 1, 1])
}

fn random_point<R: Rng + ?Sized>(bounds: &Rect, rng: &mut R) -> Vec2 {
    Vec2::new(
        bounds.min_x + rng.gen::<f64>() * bounds.width(),
        bounds.min_y + rng.gen::<f64>() * bounds.height(),
    )
}
