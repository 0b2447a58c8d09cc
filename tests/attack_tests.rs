mod common;

use common::grid;
use stealthgrid::attack::{attack_target, build_attack_grid};
use stealthgrid::config::AttackConfig;
use stealthgrid::geometry::{Bounds, Point};
use stealthgrid::grid::{tile_center, Tile, TileGrid};
use stealthgrid::spot::VisionSet;
use stealthgrid::vision::bounds_polygon;

/// Vision set covering only the center of tile (u, v)
fn watch_tile(u: i32, v: i32) -> VisionSet {
    let c = tile_center(u, v);
    let mut vision = VisionSet::new();
    vision.push(bounds_polygon(
        &Bounds::from_coords(c.x - 4.0, c.y - 4.0, c.x + 4.0, c.y + 4.0),
        1.0,
    ));
    vision
}

#[test]
fn open_grid_costs_grow_one_tile_per_step() {
    let grid = TileGrid::filled(6, 5, Tile::Floor);
    let settings = AttackConfig::default();
    let costs = build_attack_grid(tile_center(2, 2), &grid, &VisionSet::new(), &settings);

    for v in 0..grid.height {
        for u in 0..grid.width {
            let steps = ((u - 2).abs() + (v - 2).abs()) as u32;
            assert_eq!(costs.cost(u, v), Some(2 + 32 * steps), "tile ({}, {})", u, v);
        }
    }
}

#[test]
fn visible_tiles_pay_the_penalty() {
    let grid = TileGrid::filled(5, 5, Tile::Floor);
    let settings = AttackConfig::default();
    let costs = build_attack_grid(tile_center(2, 2), &grid, &watch_tile(2, 0), &settings);

    let seen = costs.cost(2, 0).unwrap();
    let hidden = costs.cost(0, 2).unwrap();
    assert_eq!(seen, 10066);
    assert_eq!(hidden, 66);
    assert!(seen >= hidden + settings.visible_penalty);
}

#[test]
fn flood_routes_around_visible_tiles() {
    // Target at the west end; the tile in the middle of row 1 is watched
    let grid = TileGrid::filled(5, 3, Tile::Floor);
    let settings = AttackConfig::default();
    let costs = build_attack_grid(tile_center(0, 1), &grid, &watch_tile(2, 1), &settings);

    assert_eq!(costs.cost(2, 1), Some(2 + 64 + 10000));
    // Going around the watched tile is five steps instead of three
    assert_eq!(costs.cost(3, 1), Some(2 + 32 * 5));
    assert_eq!(costs.cost(4, 1), Some(2 + 32 * 6));

    let next = costs.cheapest_neighbor(3, 1).unwrap();
    assert_ne!(next, (2, 1));
    assert!(next == (3, 0) || next == (3, 2));
}

#[test]
fn walls_are_recorded_and_stop_the_flood() {
    let grid = grid(
        "######\n\
         #..#.#\n\
         #..#.#\n\
         ######",
    );
    let settings = AttackConfig::default();
    let costs = build_attack_grid(tile_center(1, 1), &grid, &VisionSet::new(), &settings);

    assert!(costs.is_forbidden(3, 1));
    assert!(costs.is_forbidden(0, 2));
    assert_eq!(costs.cost(2, 2), Some(2 + 64));
    // Sealed off behind the wall column
    assert_eq!(costs.cost(4, 1), None);
    assert_eq!(costs.cost(4, 2), None);
}

#[test]
fn target_on_a_wall_only_marks_that_wall() {
    let grid = grid("###\n#.#\n###");
    let settings = AttackConfig::default();
    let costs = build_attack_grid(tile_center(0, 0), &grid, &VisionSet::new(), &settings);
    assert_eq!(costs.reached(), 1);
    assert!(costs.is_forbidden(0, 0));
}

#[test]
fn target_outside_the_grid_gives_nothing() {
    let grid = TileGrid::filled(4, 4, Tile::Floor);
    let settings = AttackConfig::default();
    for target in [Point::new(-1.0, 10.0), Point::new(10.0, 200.0), Point::new(500.0, 500.0)] {
        let costs = build_attack_grid(target, &grid, &VisionSet::new(), &settings);
        assert_eq!(costs.reached(), 0, "{:?}", target);
    }
}

#[test]
fn fully_watched_map_still_terminates() {
    let grid = TileGrid::filled(8, 8, Tile::Floor);
    let mut vision = VisionSet::new();
    vision.push(bounds_polygon(&Bounds::from_coords(0.0, 0.0, 256.0, 256.0), 1.0));
    let settings = AttackConfig::default();
    let costs = build_attack_grid(tile_center(4, 4), &grid, &vision, &settings);

    assert_eq!(costs.reached(), 64);
    assert_eq!(costs.cost(4, 4), Some(2));
    // Each step into view adds a penalty
    assert_eq!(costs.cost(5, 4), Some(2 + 32 + 10000));
    assert_eq!(costs.cost(6, 4), Some(2 + 64 + 20000));
}

#[test]
fn target_sits_opposite_the_facing() {
    let player = Point::new(200.0, 200.0);
    let behind = attack_target(player, 90.0, 34.0);
    assert!((behind.x - 200.0).abs() < 1e-3);
    assert!((behind.y - 166.0).abs() < 1e-3);
}
