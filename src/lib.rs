pub mod attack;
pub mod config;
pub mod door;
pub mod edges;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod level;
pub mod spot;
pub mod vision;

pub use attack::{attack_target, build_attack_grid, CostGrid};
pub use config::Config;
pub use door::{Door, DoorAxis};
pub use edges::{build_static_edges, EdgeSet};
pub use error::{ConfigError, GridError, LevelError};
pub use geometry::{Bounds, Point, Segment};
pub use grid::{Tile, TileGrid, TILE_SIZE};
pub use level::{compute_frame, FrameState, Level, LevelData, Observer, PlayerView};
pub use spot::{is_entity_visible, is_point_visible, EntityFootprint, VisionSet};
pub use vision::{cast_vision_cone, ConeSpec, Polygon};
