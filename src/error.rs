use std::path::PathBuf;

/// Errors raised while setting up a game, either from a config file or from
/// the players and board size handed to a new session.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("both players chose the color '{color}', please choose different colors")]
    DuplicateColor { color: String },

    #[error("both players have the same identity")]
    DuplicatePlayerId,

    #[error("board must be at least 1x1, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },
}

/// A move that was not played. The session is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,

    #[error("column {column} is off the board (valid columns are 0..{width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}
