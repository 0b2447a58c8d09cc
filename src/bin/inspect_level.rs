/// Level inspector
///
/// Loads a level JSON file, runs one frame from the given player pose and
/// prints the static edges, what is visible and the attack cost grid.
use stealthgrid::config::Config;
use stealthgrid::geometry::Point;
use stealthgrid::grid::{tile_center, Tile};
use stealthgrid::level::{compute_frame, Level, PlayerView};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <level.json> [x y facing]", args[0]);
        eprintln!("Prints occlusion edges, visibility and attack costs for one frame");
        process::exit(1);
    }

    let config = Config::load();
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let level = match Level::load_from_file(&args[1], &config.vision) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let pose: Vec<f32> = args[2..].iter().filter_map(|arg| arg.parse().ok()).collect();
    let (position, facing) = match pose.as_slice() {
        [x, y, facing] => (Point::new(*x, *y), *facing),
        [x, y] => (Point::new(*x, *y), 0.0),
        _ => (
            level.enter.map(|zone| zone.center()).unwrap_or_else(|| tile_center(1, 1)),
            0.0,
        ),
    };

    let player = PlayerView::new(position, facing);
    let frame = compute_frame(&level, &player, &config);

    println!("=== Level: {} ===", level.name);
    println!("Size: {} x {} tiles", level.grid.width, level.grid.height);
    println!("Static edges: {}", level.edges.len());
    println!("Door edges: {}", level.dynamic_edges().len());
    println!("Cameras: {}", level.cameras.len());
    println!(
        "Player at ({:.1}, {:.1}) facing {:.1}",
        position.x, position.y, facing
    );
    println!("Vision polygons: {}\n", frame.vision.len());

    println!("=== Visibility (o = visible floor) ===");
    for v in 0..level.grid.height {
        let row: String = (0..level.grid.width)
            .map(|u| {
                let center = tile_center(u, v);
                match level.grid.tile_at(u, v) {
                    Tile::Wall => '#',
                    Tile::Void => ' ',
                    Tile::Floor if frame.vision.is_point_visible(center.x, center.y) => 'o',
                    Tile::Floor => '.',
                }
            })
            .collect();
        println!("{}", row);
    }

    println!("\n=== Attack costs (tiles from target, * = in view) ===");
    let step = stealthgrid::grid::TILE_SIZE as u32;
    let penalty = config.attack.visible_penalty.max(1);
    for v in 0..frame.attack.height {
        let row: Vec<String> = (0..frame.attack.width)
            .map(|u| match frame.attack.cost(u, v) {
                None => "   .".to_string(),
                Some(_) if frame.attack.is_forbidden(u, v) => "   #".to_string(),
                Some(cost) if cost >= penalty => format!("{:>3}*", (cost % penalty) / step),
                Some(cost) => format!("{:>4}", cost / step),
            })
            .collect();
        println!("{}", row.join(""));
    }
}
