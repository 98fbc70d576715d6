//! Level generation: random walls, rooms with doors, and the outer boundary

pub mod generation;
pub mod level;
pub mod walls;

pub use generation::{generate_level, generate_level_with_rng, RoomPlacer, RoomRejection, RoomStats};
pub use level::Level;
pub use walls::build_wall_segments;
