use thiserror::Error;

/// Problems building a tile grid from level data
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid data has {actual} tiles, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("row {row} is {actual} tiles wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, ch: char },

    #[error("unknown tile code {0}")]
    UnknownCode(u8),

    #[error("grid layout is empty")]
    Empty,
}

/// Problems loading a level file
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid level grid: {0}")]
    Grid(#[from] GridError),
}

/// Problems loading `config.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}
