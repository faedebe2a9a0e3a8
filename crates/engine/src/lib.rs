//! Engine crate - runs the simulation core on a real clock.
//!
//! The core is clock-free; this crate supplies time. One tokio task per
//! session owns the [`Game`](tui_snake_core::Game), so game state is never
//! shared or locked. See [`session`] for the loop itself.
//!
//! ```no_run
//! use tui_snake_core::{Game, GameConfig};
//! use tui_snake_engine::{spawn_session, SessionConfig};
//! use tui_snake_types::Direction;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let game = Game::new(GameConfig::default())?;
//! let mut session = spawn_session(game, SessionConfig::default());
//!
//! session.handle.set_direction(Direction::Up)?;
//! if let Some(event) = session.events.recv().await {
//!     println!("{:?}", event);
//! }
//!
//! session.handle.shutdown().await?;
//! let summary = session.task.await??;
//! println!("best score: {}", summary.best);
//! # Ok(())
//! # }
//! ```

pub mod session;

pub use session::{
    spawn_session, Session, SessionCommand, SessionConfig, SessionHandle, SessionSummary,
    DEFAULT_MAX_PENDING_COMMANDS,
};
