//! Snapshot module - render-ready copy of a game
//!
//! Filled by [`crate::Game::snapshot_into`], which reuses the vectors of an
//! existing snapshot so a renderer can refresh one buffer every frame.

use serde::Serialize;

use crate::types::{Direction, EngineState, ItemKind, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SegmentSnapshot {
    pub position: Position,
    pub facing: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ItemSnapshot {
    pub kind: ItemKind,
    pub position: Position,
}

/// Everything a renderer needs to draw one frame
///
/// Segments are ordered head first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board_size: u16,
    pub segments: Vec<SegmentSnapshot>,
    pub items: Vec<ItemSnapshot>,
    pub state: EngineState,
    pub score: u32,
    pub best: u32,
    pub base_speed: f64,
    pub current_speed: f64,
    pub length: usize,
    pub ticks: u64,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<SegmentSnapshot> {
        self.segments.first().copied()
    }

    pub fn is_over(&self) -> bool {
        self.state == EngineState::Stopped
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board_size: 0,
            segments: Vec::new(),
            items: Vec::new(),
            state: EngineState::Idle,
            score: 0,
            best: 0,
            base_speed: 0.0,
            current_speed: 0.0,
            length: 0,
            ticks: 0,
        }
    }
}
