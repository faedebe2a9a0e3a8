//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the snake simulation: the toroidal grid,
//! the segment chain and its movement algorithm, the engine state machine,
//! timed speed modifiers, the item field and scoring. It has **no clock and
//! no I/O**; a driver (see `tui-snake-engine`) decides when time passes.
//!
//! - **Deterministic**: the same configuration and seed produce identical games
//! - **Testable**: every rule is reachable from plain function calls
//! - **Allocation-light**: steps report events in a fixed-capacity buffer
//!
//! # Module Structure
//!
//! - [`grid`]: N×N torus, index wrapping and single-cell steps
//! - [`chain`]: ordered segments and the head→tail propagation algorithm
//! - [`speed`]: tick rate and the single timed speed modifier
//! - [`snake`]: engine state machine (`Idle` → `Running` → `Stopped`) and actions
//! - [`items`]: bounded random item spawning and contact resolution
//! - [`rng`]: seeded randomness for item cells and kinds
//! - [`score`]: points from size changes, with a best score
//! - [`game`]: composition of all of the above into one board
//! - [`config`]: construction input, from JSON or `SNAKE_*` variables
//! - [`snapshot`]: render-ready copy of a game
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{Game, GameConfig};
//! use tui_snake_core::types::{Direction, EngineState, Position};
//!
//! let config = GameConfig {
//!     board_size: 4,
//!     max_items: 0,
//!     ..GameConfig::default()
//! };
//! let mut game = Game::new(config).unwrap();
//!
//! // Three stacked segments have already unspooled to the right.
//! assert_eq!(game.engine().head_position(), Position::new(0, 3));
//!
//! game.start();
//! game.step().unwrap();
//! assert_eq!(game.engine().head_position(), Position::new(0, 0));
//!
//! // Turning back into the body ends the game.
//! game.set_direction(Direction::Left);
//! let outcome = game.step().unwrap();
//! assert!(outcome.died());
//! assert_eq!(game.state(), EngineState::Stopped);
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod items;
pub mod rng;
pub mod score;
pub mod snake;
pub mod snapshot;
pub mod speed;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use chain::{Chain, Segment};
pub use config::GameConfig;
pub use error::{ConfigError, Error, Result};
pub use game::{Game, StepOutcome};
pub use grid::Grid;
pub use items::{Item, ItemField};
pub use rng::ItemRng;
pub use score::Scoreboard;
pub use snake::{EventBuffer, SnakeEngine};
pub use snapshot::{GameSnapshot, ItemSnapshot, SegmentSnapshot};
pub use speed::{SpeedModifier, SpeedSettings, SpeedState};
