//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data (plus serde derives), usable from the
//! simulation core, the scheduler, input glue and any renderer.
//!
//! # Board
//!
//! The board is an N×N torus. Positions are `(row, col)` with row 0 at the
//! bottom: `Up` increments the row, `Down` decrements it, `Right` increments
//! the column and `Left` decrements it. Every axis wraps.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_LENGTH` | 3 | Shortest legal snake; shrinking below it ends the game |
//! | `MIN_BOARD_SIZE` | 2 | Smallest accepted board edge |
//! | `DEFAULT_BOARD_SIZE` | 16 | Board edge used when nothing is configured |
//! | `DEFAULT_BASE_SPEED` | 4.0 | Ticks per second |
//! | `DEFAULT_SPEED_CHANGE_AMOUNT` | 1.5 | Speed-up multiplier (slow-down uses the reciprocal) |
//! | `DEFAULT_SPEED_CHANGE_MS` | 1000 | Lifetime of a timed speed modifier |
//! | `DEFAULT_MAX_ITEMS` | 5 | Items kept on the board |
//! | `DEFAULT_MIN_ITEM_DISTANCE` | 3 | Spawn exclusion zone around the head |
//! | `FALLBACK_TICK_MS` | 1000 | Tick interval when speed is zero or negative |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, ItemKind, Position, MIN_LENGTH};
//!
//! // Directions are an involution under `opposite`
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! assert_eq!(Direction::Left.opposite().opposite(), Direction::Left);
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(Direction::from_str("RIGHT"), Some(Direction::Right));
//!
//! // Items carry the message shown when they are consumed
//! assert_eq!(ItemKind::from_str("speedUp"), Some(ItemKind::SpeedUp));
//! assert!(!ItemKind::Edible.message().is_empty());
//!
//! let p = Position::new(1, 2);
//! assert_eq!((p.row, p.col), (1, 2));
//! assert_eq!(MIN_LENGTH, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Minimum number of segments in a live snake
pub const MIN_LENGTH: usize = 3;

/// Number of advances performed at initialization so the stacked segments separate
pub const UNSPOOL_STEPS: usize = MIN_LENGTH;

/// Smallest board edge accepted by the grid
pub const MIN_BOARD_SIZE: u16 = 2;

/// Default board edge (16×16 cells)
pub const DEFAULT_BOARD_SIZE: u16 = 16;

/// Default tick rate in ticks per second
pub const DEFAULT_BASE_SPEED: f64 = 4.0;

/// Default speed-up multiplier; slow-down applies its reciprocal
pub const DEFAULT_SPEED_CHANGE_AMOUNT: f64 = 1.5;

/// Default lifetime of a timed speed modifier in milliseconds
pub const DEFAULT_SPEED_CHANGE_MS: u64 = 1000;

/// Default number of items kept on the board
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Default spawn exclusion distance around the head (per axis)
pub const DEFAULT_MIN_ITEM_DISTANCE: u16 = 3;

/// Tick interval used when the current speed is zero or negative
pub const FALLBACK_TICK_MS: u64 = 1000;

/// Upper bound on events produced between two drains of the engine buffer
pub const MAX_EVENTS_PER_STEP: usize = 8;

/// Cardinal movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Down.opposite(), Direction::Up);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit offset as `(row, col)`
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "up" | "u", "down" | "d", "left" | "l", "right" | "r"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A cell on the board, `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// Kinds of interactive items that can appear on the board
///
/// - **Edible**: grows the snake by one segment
/// - **Inedible**: shrinks the snake by one segment (fatal at minimum length)
/// - **SpeedUp**: temporarily multiplies the tick rate
/// - **SlowDown**: temporarily divides the tick rate
/// - **HeadTailSwap**: reverses the snake so the tail leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Edible,
    Inedible,
    SpeedUp,
    SlowDown,
    HeadTailSwap,
}

impl ItemKind {
    /// Every item kind, used for uniform random selection
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Edible,
        ItemKind::Inedible,
        ItemKind::SpeedUp,
        ItemKind::SlowDown,
        ItemKind::HeadTailSwap,
    ];

    /// Text shown to the player when the item takes effect
    pub fn message(&self) -> &'static str {
        match self {
            ItemKind::Edible => "Yummy! +1",
            ItemKind::Inedible => "Yuck! -1",
            ItemKind::SpeedUp => "Speed up!",
            ItemKind::SlowDown => "Slow down...",
            ItemKind::HeadTailSwap => "Head-tail swap!",
        }
    }

    /// Parse item kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::ItemKind;
    ///
    /// assert_eq!(ItemKind::from_str("edible"), Some(ItemKind::Edible));
    /// assert_eq!(ItemKind::from_str("headTailSwap"), Some(ItemKind::HeadTailSwap));
    /// assert_eq!(ItemKind::from_str("apple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "edible" => Some(ItemKind::Edible),
            "inedible" => Some(ItemKind::Inedible),
            "speedup" => Some(ItemKind::SpeedUp),
            "slowdown" => Some(ItemKind::SlowDown),
            "headtailswap" => Some(ItemKind::HeadTailSwap),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Edible => "edible",
            ItemKind::Inedible => "inedible",
            ItemKind::SpeedUp => "speedUp",
            ItemKind::SlowDown => "slowDown",
            ItemKind::HeadTailSwap => "headTailSwap",
        }
    }
}

/// Lifecycle of the snake engine
///
/// `Idle` → `Running` → `Stopped`. `Stopped` is terminal until the engine is
/// rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Running,
    Stopped,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Running => "running",
            EngineState::Stopped => "stopped",
        }
    }
}

/// One-way notifications emitted by the core for score/audio collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// The snake gained (+1) or lost (-1) a segment
    SizeChanged { delta: i8 },
    /// The game ended (self-collision or shrinking below minimum length)
    SnakeDied,
    /// An item was consumed
    EffectOccurred {
        kind: ItemKind,
        message: &'static str,
    },
}

impl GameEvent {
    pub fn effect(kind: ItemKind) -> Self {
        GameEvent::EffectOccurred {
            kind,
            message: kind.message(),
        }
    }
}
