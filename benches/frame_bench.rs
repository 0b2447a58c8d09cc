//! Per-frame cost of the visibility pipeline.
//!
//! Run with: cargo bench --bench frame_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stealthgrid::config::Config;
use stealthgrid::edges::build_static_edges;
use stealthgrid::geometry::Point;
use stealthgrid::grid::{Tile, TileGrid};
use stealthgrid::level::{compute_frame, Level, Observer, PlayerView};

/// Square map with a ring of walls and a pillar every fourth tile
fn pillar_grid(size: i32) -> TileGrid {
    let mut grid = TileGrid::filled(size, size, Tile::Floor);
    for i in 0..size {
        grid.set_tile(i, 0, Tile::Wall);
        grid.set_tile(i, size - 1, Tile::Wall);
        grid.set_tile(0, i, Tile::Wall);
        grid.set_tile(size - 1, i, Tile::Wall);
    }
    for v in (3..size - 1).step_by(4) {
        for u in (3..size - 1).step_by(4) {
            grid.set_tile(u, v, Tile::Wall);
        }
    }
    grid
}

fn bench_static_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("static_edges");
    for size in [16, 32, 64] {
        let grid = pillar_grid(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| build_static_edges(black_box(grid), 4.0));
        });
    }
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("frame");

    for cameras in [0usize, 2, 4] {
        let mut level = Level::new(pillar_grid(24), config.vision.inset);
        level.cameras = (0..cameras)
            .map(|i| Observer {
                x: 48.0 + i as f32 * 160.0,
                y: 48.0,
                facing: 90.0,
                fov: 70.0,
                enabled: true,
            })
            .collect();
        let player = PlayerView::new(Point::new(400.0, 400.0), 225.0);

        group.bench_with_input(BenchmarkId::new("cameras", cameras), &level, |b, level| {
            b.iter(|| compute_frame(black_box(level), black_box(&player), &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_static_edges, bench_frame);
criterion_main!(benches);
