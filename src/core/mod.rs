pub mod config;
pub mod error;
pub mod types;

pub use config::LevelConfig;
pub use error::{Result, SightError};
pub use types::{Intersection, Rect, Segment, Vec2};
