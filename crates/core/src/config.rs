//! Configuration module - board construction input
//!
//! A [`GameConfig`] can be built from defaults, from a JSON document, or from
//! `SNAKE_*` environment variables layered over an optional JSON file named by
//! `SNAKE_CONFIG`. Values are only checked by [`GameConfig::validate`], which
//! rejects exactly what [`crate::Game::new`] would.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::items::ItemField;
use crate::speed::SpeedSettings;
use crate::types::{
    Direction, Position, DEFAULT_BASE_SPEED, DEFAULT_BOARD_SIZE, DEFAULT_MAX_ITEMS,
    DEFAULT_MIN_ITEM_DISTANCE, DEFAULT_SPEED_CHANGE_AMOUNT, DEFAULT_SPEED_CHANGE_MS,
};

/// Everything needed to build a [`crate::Game`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: u16,
    pub start_row: u16,
    pub start_col: u16,
    pub start_direction: Direction,
    /// Ticks per second
    pub base_speed: f64,
    pub speed_change_amount: f64,
    pub speed_change_duration_ms: u64,
    pub max_items: usize,
    pub min_item_distance: u16,
    pub seed: u64,
    pub best_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            start_row: 0,
            start_col: 0,
            start_direction: Direction::Right,
            base_speed: DEFAULT_BASE_SPEED,
            speed_change_amount: DEFAULT_SPEED_CHANGE_AMOUNT,
            speed_change_duration_ms: DEFAULT_SPEED_CHANGE_MS,
            max_items: DEFAULT_MAX_ITEMS,
            min_item_distance: DEFAULT_MIN_ITEM_DISTANCE,
            seed: 1,
            best_score: 0,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from the process environment
    ///
    /// `SNAKE_CONFIG` names an optional JSON file used as the base; the
    /// per-field variables below override it. Unparseable values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup("SNAKE_CONFIG")) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Parse(format!("{}: {}", path, e)))?;
                Self::from_json_str(&json)?
            }
            None => Self::default(),
        };

        let get = |key: &'static str| non_empty(lookup(key)).map(|value| (key, value));

        if let Some((key, value)) = get("SNAKE_BOARD_SIZE") {
            config.board_size = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_START_ROW") {
            config.start_row = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_START_COL") {
            config.start_col = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_START_DIRECTION") {
            config.start_direction =
                Direction::from_str(&value).ok_or(ConfigError::Env { key, value })?;
        }
        if let Some((key, value)) = get("SNAKE_SPEED") {
            config.base_speed = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_SPEED_CHANGE_AMOUNT") {
            config.speed_change_amount = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_SPEED_CHANGE_MS") {
            config.speed_change_duration_ms = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_MAX_ITEMS") {
            config.max_items = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_MIN_ITEM_DISTANCE") {
            config.min_item_distance = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_SEED") {
            config.seed = parse(key, &value)?;
        }
        if let Some((key, value)) = get("SNAKE_BEST_SCORE") {
            config.best_score = parse(key, &value)?;
        }

        Ok(config)
    }

    pub fn start_position(&self) -> Position {
        Position::new(self.start_row, self.start_col)
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.board_size)
    }

    pub fn speed_settings(&self) -> SpeedSettings {
        SpeedSettings {
            base_speed: self.base_speed,
            change_amount: self.speed_change_amount,
            change_duration: Duration::from_millis(self.speed_change_duration_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid()?;
        if !grid.contains(self.start_position()) {
            return Err(ConfigError::StartOutOfBounds {
                position: self.start_position(),
                size: self.board_size,
            });
        }
        self.speed_settings().validate()?;
        ItemField::validate(self.max_items, &grid)?;
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env {
        key,
        value: value.to_string(),
    })
}
