//! Generated level: the occluder set plus room floors

use serde::{Deserialize, Serialize};

use crate::core::types::{Rect, Segment};

/// Immutable result of one generation request.
///
/// Regenerating produces a new `Level`; an existing one is never mutated, so
/// it can be shared freely between concurrent visibility queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Play area the level was generated in
    pub bounds: Rect,
    /// Every wall, in draw order: random lines, room walls, outer walls
    pub occluders: Vec<Segment>,
    /// Accepted room rectangles, for drawing floors
    pub rooms: Vec<Rect>,
}

impl Level {
    pub fn occluders(&self) -> &[Segment] {
        &self.occluders
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Diagonal of the play area; a natural ray range for queries
    pub fn diagonal(&self) -> f64 {
        self.bounds.diagonal()
    }

    pub fn to_json(&self) -> crate::core::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
