use std::path::Path;

use crate::error::ConfigError;
use crate::game::{GameSession, Player, PlayerId, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};

/// Board dimensions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        }
    }
}

/// Display colours for the two players. Any name or `#rrggbb` value the
/// terminal front end understands.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub first_color: String,
    pub second_color: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            first_color: "red".to_string(),
            second_color: "yellow".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub players: PlayersConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.height == 0 {
            return Err(ConfigError::Validation("board.height must be > 0".into()));
        }
        if self.board.width == 0 {
            return Err(ConfigError::Validation("board.width must be > 0".into()));
        }
        if self.board.height > MAX_DIMENSION || self.board.width > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.height and board.width must be <= {MAX_DIMENSION}"
            )));
        }
        if self.players.first_color.trim().is_empty() || self.players.second_color.trim().is_empty() {
            return Err(ConfigError::Validation(
                "players.first_color and players.second_color must not be empty".into(),
            ));
        }
        let (first, second) = self.players();
        if first.same_color_ignoring_case(&second) {
            return Err(ConfigError::DuplicateColor {
                color: first.color,
            });
        }
        Ok(())
    }

    /// The two players described by this config, first to move first.
    pub fn players(&self) -> (Player, Player) {
        (
            Player::new(PlayerId::First, self.players.first_color.trim()),
            Player::new(PlayerId::Second, self.players.second_color.trim()),
        )
    }

    /// Start a game with these settings.
    pub fn new_session(&self) -> Result<GameSession, ConfigError> {
        let (first, second) = self.players();
        GameSession::with_dimensions(first, second, self.board.height, self.board.width)
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
