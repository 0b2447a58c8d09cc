use crate::geometry::{Point, Segment};
use crate::grid::{world_to_tile, TILE_SIZE};
use serde::{Deserialize, Serialize};

/// Distance the panel travels from fully closed to fully retracted
pub const DOOR_TRAVEL: f32 = TILE_SIZE * 2.0;

/// Panel speed in world units per second
pub const DOOR_SPEED: f32 = 96.0;

/// Below this much slide the door still blocks movement
pub const DOOR_BLOCKING_SLIDE: f32 = 10.0;

/// Near and far faces of the panel, measured across the door from its tile edge
const PANEL_NEAR: f32 = 4.0;
const PANEL_FAR: f32 = 28.0;

/// Direction the two door tiles are laid out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorAxis {
    /// Door tiles (u, v) and (u + 1, v); blocks north-south travel
    Horizontal,
    /// Door tiles (u, v) and (u, v + 1); blocks east-west travel
    Vertical,
}

/// A sliding door spanning two tiles.
///
/// The panel retracts toward the far end of the doorway as `slide` grows from
/// 0 (closed) to `DOOR_TRAVEL` (fully open).
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub u: i32,
    pub v: i32,
    pub axis: DoorAxis,
    pub slide: f32,
    /// Requested state; `update` animates `slide` toward it
    pub open: bool,
    /// How far the panel reaches into the walls on either side
    pub inset: f32,
}

impl Door {
    pub fn new(u: i32, v: i32, axis: DoorAxis, inset: f32) -> Self {
        Door {
            u,
            v,
            axis,
            slide: 0.0,
            open: false,
            inset,
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_fully_open(&self) -> bool {
        self.slide >= DOOR_TRAVEL
    }

    pub fn is_fully_closed(&self) -> bool {
        self.slide <= 0.0
    }

    /// Move the panel toward the requested state (call once per frame)
    pub fn update(&mut self, delta_time: f32) {
        let step = DOOR_SPEED * delta_time;
        if self.open {
            self.slide = (self.slide + step).min(DOOR_TRAVEL);
        } else {
            self.slide = (self.slide - step).max(0.0);
        }
    }

    /// Start and end of the doorway along its axis, reaching `inset` into the walls
    fn span(&self) -> (f32, f32) {
        let start = match self.axis {
            DoorAxis::Horizontal => self.u as f32 * TILE_SIZE,
            DoorAxis::Vertical => self.v as f32 * TILE_SIZE,
        };
        (start - self.inset, start + DOOR_TRAVEL + self.inset)
    }

    /// Occlusion edges for the current panel position: both faces of the
    /// panel, or nothing once fully open. Floor stays on the left of each edge.
    pub fn los_edges(&self) -> Vec<Segment> {
        if self.is_fully_open() {
            return Vec::new();
        }

        let (start, end) = self.span();
        let from = start + self.slide.max(0.0);

        match self.axis {
            DoorAxis::Horizontal => {
                let top = self.v as f32 * TILE_SIZE + PANEL_NEAR;
                let bottom = self.v as f32 * TILE_SIZE + PANEL_FAR;
                vec![
                    Segment::from_coords(end, top, from, top),
                    Segment::from_coords(from, bottom, end, bottom),
                ]
            }
            DoorAxis::Vertical => {
                let left = self.u as f32 * TILE_SIZE + PANEL_NEAR;
                let right = self.u as f32 * TILE_SIZE + PANEL_FAR;
                vec![
                    Segment::from_coords(left, from, left, end),
                    Segment::from_coords(right, end, right, from),
                ]
            }
        }
    }

    /// Whether the door stops an entity at `p`
    pub fn blocks_point(&self, p: Point) -> bool {
        if self.slide >= DOOR_BLOCKING_SLIDE {
            return false;
        }

        let (u, v) = world_to_tile(p);
        let (on_door, across) = match self.axis {
            DoorAxis::Horizontal => (
                v == self.v && (u == self.u || u == self.u + 1),
                p.y - self.v as f32 * TILE_SIZE,
            ),
            DoorAxis::Vertical => (
                u == self.u && (v == self.v || v == self.v + 1),
                p.x - self.u as f32 * TILE_SIZE,
            ),
        };

        on_door && across > PANEL_NEAR - 1.0 && across < PANEL_FAR
    }
}
