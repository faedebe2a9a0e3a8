//! Input module (session-facing).
//!
//! This crate is independent of any UI framework beyond `crossterm` key
//! events. It maps terminal keys to [`InputCommand`]s and analog move vectors
//! to [`types::Direction`]s; both are then fed to a session handle.

pub mod map;
pub mod vector;

pub use tui_snake_types as types;

pub use map::{handle_key_event, should_quit, InputCommand};
pub use vector::direction_from_vector;
