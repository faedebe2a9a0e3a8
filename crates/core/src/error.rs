//! Error types for the simulation core.
//!
//! Only two things can go wrong here: the board/engine was configured with
//! values it cannot run with, or a caller ticked an engine that is not
//! running. Game over is a state transition, never an error.

use thiserror::Error;

use crate::types::{EngineState, Position};

/// Construction-time configuration problems. Not recoverable without new input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size {size} is below the minimum of {min}")]
    BoardTooSmall { size: u16, min: u16 },

    #[error("start position ({}, {}) lies outside a {size}x{size} board", .position.row, .position.col)]
    StartOutOfBounds { position: Position, size: u16 },

    #[error("invalid speed setting `{name}`: {value}")]
    InvalidSpeed { name: &'static str, value: f64 },

    #[error("invalid item setting: {0}")]
    InvalidItemSettings(String),

    #[error("invalid chain: {0}")]
    InvalidChain(String),

    #[error("environment variable {key} has invalid value `{value}`")]
    Env { key: &'static str, value: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors surfaced by the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// `tick` was called while the engine was not running.
    #[error("tick rejected: engine is {}", .state.as_str())]
    TickRejected { state: EngineState },
}

pub type Result<T> = std::result::Result<T, Error>;
