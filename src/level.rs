use crate::attack::{attack_target, build_attack_grid, CostGrid};
use crate::config::{Config, VisionConfig};
use crate::door::{Door, DoorAxis, DOOR_TRAVEL};
use crate::edges::{build_static_edges, EdgeSet};
use crate::error::{GridError, LevelError};
use crate::geometry::{distance, point_in_bounds, Bounds, Point, Segment};
use crate::grid::{tile_center, TileGrid, TILE_SIZE};
use crate::spot::{EntityFootprint, VisionSet};
use crate::vision::{bounds_polygon, cast_vision_cone, ConeSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// A fixed viewpoint such as a security camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub x: f32,
    pub y: f32,
    /// Degrees, 0 = east, 90 = south
    pub facing: f32,
    pub fov: f32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Observer {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// What the frame pipeline needs to know about the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub position: Point,
    pub facing: f32,
    pub alive: bool,
    pub width: f32,
    pub height: f32,
}

impl PlayerView {
    pub fn new(position: Point, facing: f32) -> Self {
        PlayerView {
            position,
            facing,
            alive: true,
            width: TILE_SIZE * 0.75,
            height: TILE_SIZE * 0.75,
        }
    }
}

impl EntityFootprint for PlayerView {
    fn center(&self) -> Point {
        self.position
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorData {
    pub u: i32,
    pub v: i32,
    pub axis: DoorAxis,
    #[serde(default)]
    pub open: bool,
}

/// On-disk level format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub width: i32,
    pub height: i32,
    /// ASCII rows: `#` wall, `.` floor, space void
    pub rows: Vec<String>,
    #[serde(default)]
    pub doors: Vec<DoorData>,
    #[serde(default)]
    pub cameras: Vec<Observer>,
    #[serde(default)]
    pub enter: Option<Bounds>,
    #[serde(default)]
    pub exit: Option<Bounds>,
}

impl LevelData {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn to_json_string(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the rows and build the static geometry
    pub fn into_level(self, settings: &VisionConfig) -> Result<Level, LevelError> {
        let grid = parse_rows(&self.rows, self.width, self.height)?;

        let doors = self
            .doors
            .iter()
            .map(|data| {
                let mut door = Door::new(data.u, data.v, data.axis, settings.inset);
                if data.open {
                    door.open = true;
                    door.slide = DOOR_TRAVEL;
                }
                door
            })
            .collect();

        let mut level = Level::new(grid, settings.inset);
        level.name = self.name;
        level.doors = doors;
        level.cameras = self.cameras;
        level.enter = self.enter;
        level.exit = self.exit;

        info!(
            name = %level.name,
            width = level.grid.width,
            height = level.grid.height,
            edges = level.edges.len(),
            doors = level.doors.len(),
            cameras = level.cameras.len(),
            "loaded level"
        );

        Ok(level)
    }
}

fn parse_rows(rows: &[String], width: i32, height: i32) -> Result<TileGrid, GridError> {
    if rows.len() != height.max(0) as usize {
        return Err(GridError::SizeMismatch {
            expected: (width.max(0) * height.max(0)) as usize,
            actual: rows.iter().map(|row| row.chars().count()).sum(),
        });
    }

    let grid = TileGrid::from_rows(rows)?;
    if grid.width != width || grid.height != height {
        return Err(GridError::SizeMismatch {
            expected: (width.max(0) * height.max(0)) as usize,
            actual: (grid.width * grid.height) as usize,
        });
    }
    Ok(grid)
}

/// Everything a frame needs about the loaded level, passed explicitly to
/// every query instead of living in global state
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub grid: TileGrid,
    pub edges: EdgeSet,
    pub doors: Vec<Door>,
    pub cameras: Vec<Observer>,
    pub enter: Option<Bounds>,
    pub exit: Option<Bounds>,
    inset: f32,
}

impl Level {
    pub fn new(grid: TileGrid, inset: f32) -> Self {
        let edges = build_static_edges(&grid, inset);
        Level {
            name: String::new(),
            grid,
            edges,
            doors: Vec::new(),
            cameras: Vec::new(),
            enter: None,
            exit: None,
            inset,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P, settings: &VisionConfig) -> Result<Self, LevelError> {
        LevelData::load_from_file(path)?.into_level(settings)
    }

    /// Swap in a new tile grid and rebuild the static edges from it
    pub fn reload_grid(&mut self, grid: TileGrid) {
        self.edges = build_static_edges(&grid, self.inset);
        self.grid = grid;
        info!(
            width = self.grid.width,
            height = self.grid.height,
            edges = self.edges.len(),
            "reloaded level grid"
        );
    }

    /// Occlusion edges of every door in its current state
    pub fn dynamic_edges(&self) -> Vec<Segment> {
        self.doors.iter().flat_map(|door| door.los_edges()).collect()
    }

    pub fn update_doors(&mut self, delta_time: f32) {
        for door in &mut self.doors {
            door.update(delta_time);
        }
    }

    /// The door whose center is closest to `p`, if within `reach`
    pub fn nearest_door_mut(&mut self, p: Point, reach: f32) -> Option<&mut Door> {
        self.doors
            .iter_mut()
            .map(|door| {
                let center = door_center(door);
                (distance(p, center), door)
            })
            .filter(|(d, _)| *d <= reach)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, door)| door)
    }

    /// Whether an entity may stand at `p`
    pub fn is_walkable(&self, p: Point) -> bool {
        !self.grid.is_wall_at_xy(p.x, p.y) && !self.doors.iter().any(|door| door.blocks_point(p))
    }

    /// Entry and exit zones currently containing `p`
    pub fn safe_zones_at(&self, p: Point) -> impl Iterator<Item = &Bounds> {
        [self.enter.as_ref(), self.exit.as_ref()]
            .into_iter()
            .flatten()
            .filter(move |zone| point_in_bounds(p, zone, 0.0))
    }
}

fn door_center(door: &Door) -> Point {
    let first = tile_center(door.u, door.v);
    match door.axis {
        DoorAxis::Horizontal => Point::new(first.x + TILE_SIZE / 2.0, first.y),
        DoorAxis::Vertical => Point::new(first.x, first.y + TILE_SIZE / 2.0),
    }
}

/// Per-frame output: everything visible plus the enemy approach costs
#[derive(Debug, Clone)]
pub struct FrameState {
    pub vision: VisionSet,
    pub attack: CostGrid,
}

/// Run one frame of the visibility pipeline.
///
/// Order: safe zones the player stands in, each enabled camera, the player's
/// own cone while alive, then the attack grid built against that vision set.
pub fn compute_frame(level: &Level, player: &PlayerView, config: &Config) -> FrameState {
    let settings = &config.vision;
    let static_edges = level.edges.as_slice();
    let door_edges = level.dynamic_edges();

    let mut vision = VisionSet::new();

    for zone in level.safe_zones_at(player.position) {
        vision.push(bounds_polygon(zone, settings.safe_zone_opacity));
    }

    for camera in level.cameras.iter().filter(|camera| camera.enabled) {
        let cone = ConeSpec {
            origin: camera.position(),
            facing: camera.facing,
            fov: camera.fov,
            offset: settings.camera_offset,
            backwalk: settings.camera_backwalk,
            opacity: settings.camera_opacity,
        };
        vision.push(cast_vision_cone(&cone, static_edges, &door_edges, settings));
    }

    if player.alive {
        let cone = ConeSpec {
            origin: player.position,
            facing: player.facing,
            fov: settings.player_fov,
            offset: settings.player_offset,
            backwalk: settings.player_backwalk,
            opacity: settings.player_opacity,
        };
        vision.push(cast_vision_cone(&cone, static_edges, &door_edges, settings));
    }

    let target = attack_target(player.position, player.facing, config.attack.target_distance);
    let attack = build_attack_grid(target, &level.grid, &vision, &config.attack);

    FrameState { vision, attack }
}
