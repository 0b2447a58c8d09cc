use crate::geometry::{Point, Segment};
use crate::grid::{TileGrid, TILE_SIZE};
use std::collections::HashMap;
use tracing::debug;

/// Which side of a floor tile a boundary edge was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Left and bottom edges are built in ascending coordinate order, which puts
    /// floor on the wrong side; they get reversed once merged.
    fn needs_flip(self) -> bool {
        matches!(self, Side::Left | Side::Bottom)
    }
}

/// Merge key: the trailing endpoint of an edge under construction plus its side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub x: i32,
    pub y: i32,
    pub side: Side,
}

/// Axis-aligned edge in integer world units, before inset and winding fix-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawEdge {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

/// Static occlusion edges of a level.
/// Every edge keeps floor on its left and wall on its right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSet {
    edges: Vec<Segment>,
}

impl EdgeSet {
    pub fn new(edges: Vec<Segment>) -> Self {
        EdgeSet { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.edges
    }
}

/// Collects unit boundary edges and merges collinear runs as they arrive
struct EdgeBuilder {
    edges: HashMap<EdgeKey, RawEdge>,
}

impl EdgeBuilder {
    fn new() -> Self {
        EdgeBuilder {
            edges: HashMap::new(),
        }
    }

    /// Add an edge, extending an existing one of the same side that ends where this one starts
    fn add(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, side: Side) {
        let start = EdgeKey { x: x1, y: y1, side };
        let end = EdgeKey { x: x2, y: y2, side };

        let edge = match self.edges.remove(&start) {
            Some(existing) => RawEdge {
                x1: existing.x1,
                y1: existing.y1,
                x2,
                y2,
            },
            None => RawEdge { x1, y1, x2, y2 },
        };
        self.edges.insert(end, edge);
    }
}

/// Scan the grid once and produce the static occlusion edges.
///
/// `inset` is how far (world units) visibility may cut into wall tiles. Each
/// merged edge is pushed `inset` units into the wall, and each endpoint is
/// stretched by `inset` where the tile diagonally past it is wall (so edges
/// meet at convex corners) or pulled back where it is open (so they do not
/// poke into the floor at concave corners).
pub fn build_static_edges(grid: &TileGrid, inset: f32) -> EdgeSet {
    let size = TILE_SIZE as i32;
    let mut builder = EdgeBuilder::new();
    let mut floor_tiles = 0;

    // Row-major order matters: runs grow left to right and top to bottom, so
    // the trailing key of the previous piece is always in place when the next arrives.
    for v in 0..grid.height {
        for u in 0..grid.width {
            if !grid.is_floor(u, v) {
                continue;
            }
            floor_tiles += 1;

            let x = u * size;
            let y = v * size;

            if !grid.is_floor(u - 1, v) {
                builder.add(x, y, x, y + size, Side::Left);
            }
            if !grid.is_floor(u + 1, v) {
                builder.add(x + size, y, x + size, y + size, Side::Right);
            }
            if !grid.is_floor(u, v - 1) {
                builder.add(x, y, x + size, y, Side::Top);
            }
            if !grid.is_floor(u, v + 1) {
                builder.add(x, y + size, x + size, y + size, Side::Bottom);
            }
        }
    }

    let mut keyed: Vec<(EdgeKey, RawEdge)> = builder.edges.into_iter().collect();
    keyed.sort_by_key(|(key, _)| *key);

    let edges: Vec<Segment> = keyed
        .into_iter()
        .map(|(key, raw)| finish_edge(grid, raw, key.side, inset))
        .filter(|edge| edge.length() > 0.0)
        .collect();

    debug!(
        floor_tiles,
        edges = edges.len(),
        inset,
        "built static occlusion edges"
    );

    EdgeSet::new(edges)
}

/// Apply the inset and the winding flip to a merged edge
fn finish_edge(grid: &TileGrid, raw: RawEdge, side: Side, inset: f32) -> Segment {
    let (x1, y1) = (raw.x1 as f32, raw.y1 as f32);
    let (x2, y2) = (raw.x2 as f32, raw.y2 as f32);

    let (mut ax, mut ay, mut bx, mut by);
    match side {
        Side::Left | Side::Right => {
            let push = if side == Side::Left { -inset } else { inset };
            ax = push;
            bx = push;
            ay = -inset;
            by = inset;
            if !grid.is_wall_at_xy(x1 + ax, y1 + ay) {
                ay = -ay;
            }
            if !grid.is_wall_at_xy(x2 + bx, y2 + by) {
                by = -by;
            }
        }
        Side::Top | Side::Bottom => {
            let push = if side == Side::Top { -inset } else { inset };
            ay = push;
            by = push;
            ax = -inset;
            bx = inset;
            if !grid.is_wall_at_xy(x1 + ax, y1 + ay) {
                ax = -ax;
            }
            if !grid.is_wall_at_xy(x2 + bx, y2 + by) {
                bx = -bx;
            }
        }
    }

    let edge = Segment::new(Point::new(x1 + ax, y1 + ay), Point::new(x2 + bx, y2 + by));
    if side.needs_flip() {
        edge.reversed()
    } else {
        edge
    }
}
