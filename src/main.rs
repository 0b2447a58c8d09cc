use arboard::Clipboard;
use macroquad::prelude::*;
use serde_json::json;
use stealthgrid::config::Config;
use stealthgrid::geometry::{angle_between, Point};
use stealthgrid::grid::{tile_center, Tile, TileGrid, TILE_SIZE};
use stealthgrid::level::{compute_frame, FrameState, Level, LevelData, Observer, PlayerView};
use stealthgrid::spot::VisionSet;
use stealthgrid::vision::Polygon;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const PLAYER_SPEED: f32 = 120.0;
const DOOR_REACH: f32 = 48.0;

/// Level used when the configured level file cannot be loaded
fn fallback_level() -> serde_json::Value {
    json!({
        "name": "fallback",
        "width": 12,
        "height": 9,
        "rows": [
            "############",
            "#....#.....#",
            "#....#.....#",
            "#..........#",
            "#....#.....#",
            "###.###..###",
            "#..........#",
            "#..........#",
            "############"
        ],
        "doors": [{"u": 7, "v": 5, "axis": "horizontal"}],
        "cameras": [{"x": 340.0, "y": 40.0, "facing": 135.0, "fov": 70.0}],
        "enter": {"p1": {"x": 32.0, "y": 192.0}, "p2": {"x": 96.0, "y": 256.0}}
    })
}

/// Visualization state
struct VisState {
    config: Config,
    level: Level,
    player: PlayerView,
    frame: FrameState,
}

impl VisState {
    fn new(config: Config) -> Self {
        let level = load_level(&config);
        let player = PlayerView::new(spawn_point(&level), 0.0);
        let frame = compute_frame(&level, &player, &config);

        VisState {
            config,
            level,
            player,
            frame,
        }
    }

    fn update(&mut self, delta_time: f32) {
        let (mouse_x, mouse_y) = mouse_position();
        self.player.facing = angle_between(self.player.position, Point::new(mouse_x, mouse_y));

        let mut dx = 0.0;
        let mut dy = 0.0;
        if is_key_down(KeyCode::A) {
            dx -= 1.0;
        }
        if is_key_down(KeyCode::D) {
            dx += 1.0;
        }
        if is_key_down(KeyCode::W) {
            dy -= 1.0;
        }
        if is_key_down(KeyCode::S) {
            dy += 1.0;
        }

        // Axis at a time so the player slides along walls
        let step = PLAYER_SPEED * delta_time;
        let p = self.player.position;
        let moved_x = Point::new(p.x + dx * step, p.y);
        if self.level.is_walkable(moved_x) {
            self.player.position = moved_x;
        }
        let p = self.player.position;
        let moved_y = Point::new(p.x, p.y + dy * step);
        if self.level.is_walkable(moved_y) {
            self.player.position = moved_y;
        }

        if is_key_pressed(KeyCode::E) {
            if let Some(door) = self.level.nearest_door_mut(self.player.position, DOOR_REACH) {
                door.toggle();
                info!(u = door.u, v = door.v, open = door.open, "toggled door");
            }
        }

        if is_key_pressed(KeyCode::K) {
            self.player.alive = !self.player.alive;
        }

        self.level.update_doors(delta_time);
        self.frame = compute_frame(&self.level, &self.player, &self.config);
    }

    fn copy_to_clipboard(&self) {
        let layout = self.level.grid.to_ascii();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&layout) {
                    warn!(error = %e, "failed to copy to clipboard");
                } else {
                    info!("level layout copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to access clipboard");
            }
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "failed to read clipboard");
                return;
            }
        };

        match TileGrid::from_ascii(&text) {
            Ok(grid) => {
                self.level.reload_grid(grid);
                if !self.level.is_walkable(self.player.position) {
                    self.player.position = spawn_point(&self.level);
                }
            }
            Err(e) => warn!(error = %e, "clipboard does not hold a level layout"),
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        self.draw_tiles();

        if visual.show_cost_grid {
            self.draw_cost_grid();
        }

        for polygon in self.frame.vision.polygons() {
            fill_ring(polygon, Color::new(0.95, 0.9, 0.55, 0.35 * polygon.opacity));
        }

        if visual.show_edges {
            self.draw_edges();
        }

        for door in &self.level.doors {
            for edge in door.los_edges() {
                draw_line(edge.p1.x, edge.p1.y, edge.p2.x, edge.p2.y, 2.0, ORANGE);
            }
        }

        for camera in &self.level.cameras {
            draw_observer(camera);
        }

        let p = self.player.position;
        let color = if self.player.alive { BLUE } else { GRAY };
        draw_circle(p.x, p.y, self.player.width / 2.0, color);

        self.draw_info();
    }

    fn draw_tiles(&self) {
        let grid = &self.level.grid;
        for v in 0..grid.height {
            for u in 0..grid.width {
                let color = match grid.tile_at(u, v) {
                    Tile::Wall => Color::from_rgba(90, 90, 100, 255),
                    Tile::Floor => Color::from_rgba(45, 45, 50, 255),
                    Tile::Void => continue,
                };
                draw_rectangle(
                    u as f32 * TILE_SIZE,
                    v as f32 * TILE_SIZE,
                    TILE_SIZE - 1.0,
                    TILE_SIZE - 1.0,
                    color,
                );
            }
        }
    }

    fn draw_edges(&self) {
        for edge in self.level.edges.iter() {
            draw_line(edge.p1.x, edge.p1.y, edge.p2.x, edge.p2.y, 1.0, RED);
            // Tick toward the floor side
            let mid = edge.midpoint();
            let normal = edge.left_normal();
            draw_line(mid.x, mid.y, mid.x + normal.x * 4.0, mid.y + normal.y * 4.0, 1.0, RED);
        }
    }

    fn draw_cost_grid(&self) {
        let costs = &self.frame.attack;
        for v in 0..costs.height {
            for u in 0..costs.width {
                let Some(cost) = costs.cost(u, v) else {
                    continue;
                };
                if costs.is_forbidden(u, v) {
                    continue;
                }
                let penalty = self.config.attack.visible_penalty.max(1);
                let heat = (cost % penalty) as f32 / 512.0;
                let spotted = cost >= penalty;
                let color = if spotted {
                    Color::new(0.8, 0.1, 0.1, 0.4)
                } else {
                    Color::new(0.1, (1.0 - heat).max(0.2), 0.3, 0.4)
                };
                draw_rectangle(
                    u as f32 * TILE_SIZE + 2.0,
                    v as f32 * TILE_SIZE + 2.0,
                    TILE_SIZE - 5.0,
                    TILE_SIZE - 5.0,
                    color,
                );
            }
        }
    }

    fn draw_info(&self) {
        let info = format!(
            "Level: {}\nEdges: {} static, {} door\nPolygons: {}\nSpotted by camera: {}\nWASD: move, mouse: aim\nE: toggle door, K: toggle alive\nC: copy level, V: paste level\nEsc: close window",
            self.level.name,
            self.level.edges.len(),
            self.level.dynamic_edges().len(),
            self.frame.vision.len(),
            self.spotted_by_camera(),
        );
        let y = self.level.grid.world_size().1 + 20.0;
        for (i, line) in info.lines().enumerate() {
            draw_text(line, 10.0, y + i as f32 * 18.0, 18.0, WHITE);
        }
    }

    /// Whether any camera cone (not the player's own) covers the player
    fn spotted_by_camera(&self) -> bool {
        let cameras = self.level.cameras.iter().filter(|camera| camera.enabled).count();
        let zones = self.level.safe_zones_at(self.player.position).count();
        let camera_vision: VisionSet = self
            .frame
            .vision
            .polygons()
            .iter()
            .skip(zones)
            .take(cameras)
            .cloned()
            .collect();
        camera_vision.is_entity_visible(&self.player)
    }
}

/// Fill a cone ring laid out as far points reversed then near points, one quad per ray pair
fn fill_ring(polygon: &Polygon, color: Color) {
    let points = &polygon.points;
    if points.len() < 4 || points.len() % 2 != 0 {
        return;
    }

    let n = points.len() / 2;
    let far = |i: usize| points[n - 1 - i];
    let near = |i: usize| points[n + i];

    for i in 0..n - 1 {
        let (n0, f0, f1, n1) = (near(i), far(i), far(i + 1), near(i + 1));
        draw_triangle(vec2(n0.x, n0.y), vec2(f0.x, f0.y), vec2(f1.x, f1.y), color);
        draw_triangle(vec2(n0.x, n0.y), vec2(f1.x, f1.y), vec2(n1.x, n1.y), color);
    }
}

fn draw_observer(camera: &Observer) {
    let color = if camera.enabled { GREEN } else { DARKGRAY };
    let tip = camera.position().offset(camera.facing, 12.0);
    draw_circle(camera.x, camera.y, 6.0, color);
    draw_line(camera.x, camera.y, tip.x, tip.y, 2.0, color);
}

fn load_level(config: &Config) -> Level {
    match Level::load_from_file(&config.level.path, &config.vision) {
        Ok(level) => level,
        Err(e) => {
            warn!(path = %config.level.path, error = %e, "failed to load level, using built-in layout");
            match LevelData::from_json_str(&fallback_level().to_string()).and_then(|data| data.into_level(&config.vision)) {
                Ok(level) => level,
                Err(e) => {
                    warn!(error = %e, "built-in layout is invalid, using an empty room");
                    Level::new(TileGrid::filled(8, 8, Tile::Floor), config.vision.inset)
                }
            }
        }
    }
}

/// Center of the entry zone, or the first floor tile
fn spawn_point(level: &Level) -> Point {
    if let Some(enter) = &level.enter {
        return enter.center();
    }
    let grid = &level.grid;
    (0..grid.width * grid.height)
        .map(|id| grid.get_coords(id as usize))
        .find(|&(u, v)| grid.is_floor(u, v))
        .map(|(u, v)| tile_center(u, v))
        .unwrap_or_default()
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn window_conf() -> Conf {
    Conf {
        window_title: Config::load().visual.window_title,
        window_width: 800,
        window_height: 600,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();
    init_logging(&config);

    let mut state = VisState::new(config);

    loop {
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::V) {
            state.paste_from_clipboard();
        }
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update(get_frame_time());
        state.draw();

        next_frame().await
    }
}
