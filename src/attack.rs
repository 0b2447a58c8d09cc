use crate::config::AttackConfig;
use crate::geometry::Point;
use crate::grid::{tile_center, world_to_tile, TileGrid, TILE_SIZE};
use crate::spot::VisionSet;
use std::collections::VecDeque;
use tracing::trace;

/// Per-frame approach costs toward the attack target, one entry per tile.
/// A cost of 0 means the tile was never reached.
#[derive(Debug, Clone, PartialEq)]
pub struct CostGrid {
    pub width: i32,
    pub height: i32,
    costs: Vec<u32>,
    walls: Vec<bool>,
    wall_cost: u32,
}

impl CostGrid {
    fn new(width: i32, height: i32, wall_cost: u32) -> Self {
        CostGrid {
            width,
            height,
            costs: vec![0; (width.max(0) * height.max(0)) as usize],
            walls: vec![false; (width.max(0) * height.max(0)) as usize],
            wall_cost,
        }
    }

    fn index(&self, u: i32, v: i32) -> Option<usize> {
        if u < 0 || u >= self.width || v < 0 || v >= self.height {
            return None;
        }
        Some((u + v * self.width) as usize)
    }

    /// Recorded cost at (u, v), or None if unreached or outside the grid
    pub fn cost(&self, u: i32, v: i32) -> Option<u32> {
        self.index(u, v)
            .map(|i| self.costs[i])
            .filter(|&cost| cost != 0)
    }

    /// Whether the flood reached (u, v) and found a wall there.
    /// Its cost reads as `wall_cost`, but a floor tile priced the same is not forbidden.
    pub fn is_forbidden(&self, u: i32, v: i32) -> bool {
        self.index(u, v).is_some_and(|i| self.walls[i])
    }

    pub fn wall_cost(&self) -> u32 {
        self.wall_cost
    }

    /// Number of tiles with a recorded cost
    pub fn reached(&self) -> usize {
        self.costs.iter().filter(|&&cost| cost != 0).count()
    }

    /// The cheapest non-wall axis neighbor of (u, v), which is the next step
    /// downhill toward the target
    pub fn cheapest_neighbor(&self, u: i32, v: i32) -> Option<(i32, i32)> {
        [(u - 1, v), (u + 1, v), (u, v - 1), (u, v + 1)]
            .into_iter()
            .filter(|&(nu, nv)| !self.is_forbidden(nu, nv))
            .filter_map(|(nu, nv)| self.cost(nu, nv).map(|cost| (cost, (nu, nv))))
            .min_by_key(|&(cost, _)| cost)
            .map(|(_, tile)| tile)
    }
}

/// Point `distance` units behind the player, so enemies close in from the front
pub fn attack_target(player: Point, facing: f32, distance: f32) -> Point {
    player.offset(facing, -distance)
}

/// Flood the grid outward from the target's tile, pricing each tile by steps
/// from the target and charging a heavy penalty for tiles currently in view.
///
/// Tiles may be queued several times; a later arrival only wins with a lower
/// cost. Costs grow along every chain, so the flood always ends.
pub fn build_attack_grid(
    target: Point,
    grid: &TileGrid,
    vision: &VisionSet,
    settings: &AttackConfig,
) -> CostGrid {
    let mut costs = CostGrid::new(grid.width, grid.height, settings.wall_cost);

    let (tu, tv) = world_to_tile(target);
    if !grid.in_bounds(tu, tv) {
        return costs;
    }

    let step = TILE_SIZE as u32;
    let mut open: VecDeque<(i32, i32, u32)> = VecDeque::new();
    open.push_back((tu, tv, settings.seed_cost));
    let mut pops = 0usize;

    while let Some((u, v, mut cost)) = open.pop_front() {
        pops += 1;
        let Some(i) = costs.index(u, v) else {
            continue;
        };

        if grid.is_wall_at_uv(u, v) {
            costs.costs[i] = settings.wall_cost;
            costs.walls[i] = true;
            continue;
        }

        if (u, v) != (tu, tv) {
            let center = tile_center(u, v);
            if vision.is_point_visible(center.x, center.y) {
                cost = cost.saturating_add(settings.visible_penalty);
            }
        }

        let prior = costs.costs[i];
        if prior == 0 || cost < prior {
            costs.costs[i] = cost;
            let next = cost.saturating_add(step);
            open.push_back((u - 1, v, next));
            open.push_back((u + 1, v, next));
            open.push_back((u, v - 1, next));
            open.push_back((u, v + 1, next));
        }
    }

    trace!(pops, reached = costs.reached(), "built attack grid");

    costs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::grid::Tile;
    use crate::vision::bounds_polygon;

    #[test]
    fn test_target_tile_gets_seed_cost() {
        let grid = TileGrid::filled(3, 3, Tile::Floor);
        let costs = build_attack_grid(tile_center(1, 1), &grid, &VisionSet::new(), &AttackConfig::default());
        assert_eq!(costs.cost(1, 1), Some(2));
        assert_eq!(costs.cost(0, 1), Some(34));
        assert_eq!(costs.cost(0, 0), Some(66));
        assert_eq!(costs.reached(), 9);
    }

    #[test]
    fn test_target_outside_grid() {
        let grid = TileGrid::filled(3, 3, Tile::Floor);
        let costs = build_attack_grid(Point::new(-40.0, 10.0), &grid, &VisionSet::new(), &AttackConfig::default());
        assert_eq!(costs.reached(), 0);
        assert_eq!(costs.cost(0, 0), None);
    }

    #[test]
    fn test_target_in_view_is_not_penalized() {
        let grid = TileGrid::filled(3, 3, Tile::Floor);
        let vision: VisionSet = [bounds_polygon(&Bounds::from_coords(0.0, 0.0, 96.0, 96.0), 1.0)]
            .into_iter()
            .collect();
        let costs = build_attack_grid(tile_center(1, 1), &grid, &vision, &AttackConfig::default());
        assert_eq!(costs.cost(1, 1), Some(2));
        assert_eq!(costs.cost(1, 0), Some(10034));
    }

    #[test]
    fn test_walls_get_sentinel() {
        let grid = TileGrid::from_ascii("#####\n#...#\n#####").unwrap();
        let settings = AttackConfig::default();
        let costs = build_attack_grid(tile_center(1, 1), &grid, &VisionSet::new(), &settings);
        assert!(costs.is_forbidden(0, 1));
        assert!(costs.is_forbidden(2, 0));
        assert_eq!(costs.cost(3, 1), Some(2 + 64));
        // Walls stop the flood, so the far corner is never reached
        assert_eq!(costs.cost(0, 0), None);
    }

    #[test]
    fn test_cheapest_neighbor_walks_downhill() {
        let grid = TileGrid::from_ascii("#####\n#...#\n#####").unwrap();
        let costs = build_attack_grid(tile_center(1, 1), &grid, &VisionSet::new(), &AttackConfig::default());
        assert_eq!(costs.cheapest_neighbor(3, 1), Some((2, 1)));
        assert_eq!(costs.cheapest_neighbor(2, 1), Some((1, 1)));
    }

    #[test]
    fn test_floor_priced_like_a_wall_stays_walkable() {
        let grid = TileGrid::from_ascii("#####\n#...#\n#####").unwrap();
        let settings = AttackConfig {
            wall_cost: 34,
            ..AttackConfig::default()
        };
        let costs = build_attack_grid(tile_center(1, 1), &grid, &VisionSet::new(), &settings);
        assert_eq!(costs.cost(2, 1), Some(34));
        assert_eq!(costs.cost(0, 1), Some(34));
        assert!(!costs.is_forbidden(2, 1));
        assert!(costs.is_forbidden(0, 1));
        assert_eq!(costs.cheapest_neighbor(3, 1), Some((2, 1)));
        assert_eq!(costs.cheapest_neighbor(1, 1), Some((2, 1)));
    }

    #[test]
    fn test_attack_target_sits_behind_player() {
        let target = attack_target(Point::new(100.0, 100.0), 0.0, 34.0);
        assert!((target.x - 66.0).abs() < 1e-4);
        assert!((target.y - 100.0).abs() < 1e-4);
    }
}
