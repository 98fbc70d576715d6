//! Level generation configuration
//!
//! Values are passed explicitly to the generator; nothing here is global.
//! A config can be built in code, derived from canvas dimensions the way the
//! interactive demo does it, or loaded from a TOML file where missing keys
//! fall back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SightError};
use crate::core::types::Rect;

/// Default canvas the play area is carved out of
pub const DEFAULT_CANVAS_WIDTH: f64 = 1600.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 900.0;
pub const DEFAULT_HORIZONTAL_CELLS: u32 = 40;

/// Parameters for one level generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    // === PLAY AREA ===
    /// Left edge of the play area (already inset from the canvas)
    pub min_x: f64,
    /// Top edge of the play area
    pub min_y: f64,
    /// Right edge of the play area
    pub max_x: f64,
    /// Bottom edge of the play area
    pub max_y: f64,

    /// Grid cell size; room corners snap down to multiples of this
    pub cell_size: f64,

    // === ROOMS ===
    /// Upper bound (exclusive) for a sampled room width, before snapping
    pub max_room_width: f64,
    /// Upper bound (exclusive) for a sampled room height, before snapping
    pub max_room_height: f64,
    /// Number of placement attempts; overlapping or out-of-bounds candidates
    /// are dropped, so fewer rooms than this is normal
    pub room_iterations: u32,

    // === FREE WALLS ===
    /// Number of free-floating random wall segments
    pub line_count: u32,

    /// Seed for the generator's ChaCha stream
    pub seed: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::from_canvas(
            DEFAULT_CANVAS_WIDTH,
            DEFAULT_CANVAS_HEIGHT,
            DEFAULT_HORIZONTAL_CELLS,
        )
    }
}

impl LevelConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the play area from a canvas: the cell size is the canvas width
    /// split into `horizontal_cells`, and the play area is inset by one cell
    /// on every side.
    pub fn from_canvas(width: f64, height: f64, horizontal_cells: u32) -> Self {
        let cell_size = width / horizontal_cells.max(1) as f64;
        let margin = cell_size;
        Self {
            min_x: margin,
            min_y: margin,
            max_x: width - margin,
            max_y: height - margin,
            cell_size,
            max_room_width: 200.0,
            max_room_height: 200.0,
            room_iterations: 100,
            line_count: 5,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_line_count(mut self, line_count: u32) -> Self {
        self.line_count = line_count;
        self
    }

    pub fn with_room_iterations(mut self, room_iterations: u32) -> Self {
        self.room_iterations = room_iterations;
        self
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The play area as a rectangle; fails when the bounds are inverted
    pub fn play_area(&self) -> Result<Rect> {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y).ok_or_else(|| {
            SightError::out_of_range(
                "bounds",
                format!(
                    "play area ({}, {})-({}, {}) must have min < max on both axes",
                    self.min_x, self.min_y, self.max_x, self.max_y
                ),
            )
        })
    }

    /// Validate configuration before generating anything
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("min_x", self.min_x),
            ("min_y", self.min_y),
            ("max_x", self.max_x),
            ("max_y", self.max_y),
        ];
        for (field, value) in bounds {
            if !value.is_finite() {
                return Err(SightError::out_of_range(field, format!("{value} is not finite")));
            }
        }
        self.play_area()?;

        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SightError::out_of_range(
                "cell_size",
                format!("{} must be positive", self.cell_size),
            ));
        }

        for (field, value) in [
            ("max_room_width", self.max_room_width),
            ("max_room_height", self.max_room_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SightError::out_of_range(
                    field,
                    format!("{value} must be a non-negative number"),
                ));
            }
        }

        Ok(())
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LevelConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
