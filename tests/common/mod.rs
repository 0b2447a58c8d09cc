#![allow(dead_code)]

use stealthgrid::geometry::{Point, Segment};
use stealthgrid::grid::{Tile, TileGrid};
use stealthgrid::spot::VisionSet;
use stealthgrid::grid::tile_center;

/// Parse an ASCII layout, panicking on bad test input
pub fn grid(layout: &str) -> TileGrid {
    TileGrid::from_ascii(layout).unwrap_or_else(|e| panic!("bad test layout: {}", e))
}

/// Mirror a grid left-right
pub fn flip_horizontal(grid: &TileGrid) -> TileGrid {
    let mut flipped = TileGrid::filled(grid.width, grid.height, Tile::Void);
    for v in 0..grid.height {
        for u in 0..grid.width {
            flipped.set_tile(grid.width - 1 - u, v, grid.tile_at(u, v));
        }
    }
    flipped
}

/// Mirror a grid top-bottom
pub fn flip_vertical(grid: &TileGrid) -> TileGrid {
    let mut flipped = TileGrid::filled(grid.width, grid.height, Tile::Void);
    for v in 0..grid.height {
        for u in 0..grid.width {
            flipped.set_tile(u, grid.height - 1 - v, grid.tile_at(u, v));
        }
    }
    flipped
}

/// The grid plus its three mirror images
pub fn variants(grid: &TileGrid) -> Vec<(&'static str, TileGrid)> {
    vec![
        ("original", grid.clone()),
        ("h_flip", flip_horizontal(grid)),
        ("v_flip", flip_vertical(grid)),
        ("hv_flip", flip_vertical(&flip_horizontal(grid))),
    ]
}

/// Points `left` units to the left and `right` units to the right of the edge midpoint
pub fn side_points(edge: &Segment, left: f32, right: f32) -> (Point, Point) {
    let mid = edge.midpoint();
    let n = edge.left_normal();
    (
        Point::new(mid.x + n.x * left, mid.y + n.y * left),
        Point::new(mid.x - n.x * right, mid.y - n.y * right),
    )
}

/// Render the grid with visible floor tile centers marked `o`, for failure messages
pub fn render_visibility(grid: &TileGrid, vision: &VisionSet) -> String {
    let mut result = String::new();
    for v in 0..grid.height {
        for u in 0..grid.width {
            let center = tile_center(u, v);
            let symbol = match grid.tile_at(u, v) {
                Tile::Wall => '#',
                Tile::Void => ' ',
                Tile::Floor if vision.is_point_visible(center.x, center.y) => 'o',
                Tile::Floor => '.',
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Layouts covering straight walls, convex and concave corners, pillars,
/// diagonal contacts and void
pub const LAYOUTS: &[(&str, &str)] = &[
    ("single", "###\n#.#\n###"),
    ("room", "#####\n#...#\n#...#\n#...#\n#####"),
    ("l_shape", "####\n#..#\n#.##\n####"),
    ("pillar", "#######\n#.....#\n#.....#\n#..#..#\n#.....#\n#######"),
    ("donut", "#####\n#...#\n#.#.#\n#...#\n#####"),
    ("diagonal", "####\n#.##\n##.#\n####"),
    ("open_edge", "...\n...\n..."),
    ("void", "  #####\n  #...#\n###...#\n#.....#\n#######"),
    ("corridor", "#####\n#...#\n##.##\n##.##\n#...#\n#####"),
];
