use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub attack: AttackConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub level: LevelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cone casting and occlusion settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VisionConfig {
    /// How far visibility cuts into wall tiles
    #[serde(default = "default_inset")]
    pub inset: f32,
    /// Degrees between successive rays
    #[serde(default = "default_sweep_step")]
    pub sweep_step: f32,
    #[serde(default = "default_ray_length")]
    pub ray_length: f32,
    /// Bounding box tolerance when accepting a ray/edge hit
    #[serde(default = "default_intersection_slack")]
    pub intersection_slack: f32,
    #[serde(default = "default_player_fov")]
    pub player_fov: f32,
    #[serde(default = "default_player_offset")]
    pub player_offset: f32,
    #[serde(default)]
    pub player_backwalk: f32,
    #[serde(default = "default_player_opacity")]
    pub player_opacity: f32,
    #[serde(default = "default_camera_offset")]
    pub camera_offset: f32,
    #[serde(default)]
    pub camera_backwalk: f32,
    #[serde(default = "default_zone_opacity")]
    pub camera_opacity: f32,
    #[serde(default = "default_zone_opacity")]
    pub safe_zone_opacity: f32,
}

/// Attack grid costs
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AttackConfig {
    #[serde(default = "default_seed_cost")]
    pub seed_cost: u32,
    #[serde(default = "default_visible_penalty")]
    pub visible_penalty: u32,
    #[serde(default = "default_wall_cost")]
    pub wall_cost: u32,
    /// How far behind the player the target sits
    #[serde(default = "default_target_distance")]
    pub target_distance: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_edges")]
    pub show_edges: bool,
    #[serde(default)]
    pub show_cost_grid: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LevelConfig {
    #[serde(default = "default_level_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default values
fn default_inset() -> f32 { 4.0 }
fn default_sweep_step() -> f32 { 0.8 }
fn default_ray_length() -> f32 { 1000.0 }
fn default_intersection_slack() -> f32 { 1.0 }
fn default_player_fov() -> f32 { 120.0 }
fn default_player_offset() -> f32 { 4.0 }
fn default_player_opacity() -> f32 { 1.0 }
fn default_camera_offset() -> f32 { 12.0 }
fn default_zone_opacity() -> f32 { 0.69 }
fn default_seed_cost() -> u32 { 2 }
fn default_visible_penalty() -> u32 { 10000 }
fn default_wall_cost() -> u32 { 50000 }
fn default_target_distance() -> f32 { 34.0 }
fn default_window_title() -> String { "Stealthgrid - Vision Cone Demo".to_string() }
fn default_bg_r() -> u8 { 20 }
fn default_bg_g() -> u8 { 20 }
fn default_bg_b() -> u8 { 24 }
fn default_show_edges() -> bool { true }
fn default_level_path() -> String { "levels/demo.json".to_string() }
fn default_log_filter() -> String { "info".to_string() }

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            inset: default_inset(),
            sweep_step: default_sweep_step(),
            ray_length: default_ray_length(),
            intersection_slack: default_intersection_slack(),
            player_fov: default_player_fov(),
            player_offset: default_player_offset(),
            player_backwalk: 0.0,
            player_opacity: default_player_opacity(),
            camera_offset: default_camera_offset(),
            camera_backwalk: 0.0,
            camera_opacity: default_zone_opacity(),
            safe_zone_opacity: default_zone_opacity(),
        }
    }
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            seed_cost: default_seed_cost(),
            visible_penalty: default_visible_penalty(),
            wall_cost: default_wall_cost(),
            target_distance: default_target_distance(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_edges: default_show_edges(),
            show_cost_grid: false,
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            path: default_level_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            attack: AttackConfig::default(),
            visual: VisualConfig::default(),
            level: LevelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, or use defaults if it
    /// is missing or unreadable
    pub fn load() -> Self {
        if !Path::new(CONFIG_PATH).exists() {
            info!("no {} found, using default configuration", CONFIG_PATH);
            return Config::default();
        }

        match Self::load_from(CONFIG_PATH) {
            Ok(config) => {
                info!("loaded configuration from {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!(error = %e, "failed to load {}, using default configuration", CONFIG_PATH);
                Config::default()
            }
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
