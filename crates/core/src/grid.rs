//! Grid module - the toroidal board
//!
//! The board is an N×N torus: stepping past any edge re-enters from the
//! opposite edge. The grid holds no cell state of its own (the chain and the
//! item field own what sits on it); it only answers coordinate questions.
//! Coordinates: (row, col), row 0 at the bottom, col 0 at the left.

use crate::error::ConfigError;
use crate::types::{Direction, Position, MIN_BOARD_SIZE};

/// Square toroidal coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    size: u16,
}

impl Grid {
    /// Create a grid with `size` cells per edge
    ///
    /// Fails with [`ConfigError::BoardTooSmall`] when `size < 2`.
    pub fn new(size: u16) -> Result<Self, ConfigError> {
        if size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall {
                size,
                min: MIN_BOARD_SIZE,
            });
        }
        Ok(Self { size })
    }

    /// Cells per edge
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Reduce any index into `[0, size)`
    #[inline(always)]
    pub fn wrap(&self, index: i32) -> u16 {
        index.rem_euclid(self.size as i32) as u16
    }

    /// Check if position lies on the board
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.size && position.col < self.size
    }

    /// Move one cell in `direction`, wrapping both axes
    #[inline(always)]
    pub fn step(&self, position: Position, direction: Direction) -> Position {
        let (dr, dc) = direction.delta();
        Position {
            row: self.wrap(position.row as i32 + dr),
            col: self.wrap(position.col as i32 + dc),
        }
    }

    /// Direction `d` such that `step(from, d) == to`, if the cells are neighbours
    ///
    /// On a 2-wide board two directions reach the same neighbour; the first
    /// in [`Direction::ALL`] order wins.
    pub fn direction_between(&self, from: Position, to: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.step(from, d) == to)
    }

    /// Like [`Grid::direction_between`], but `preferred` wins whenever it
    /// reaches `to`
    pub fn direction_toward(
        &self,
        from: Position,
        to: Position,
        preferred: Direction,
    ) -> Option<Direction> {
        if self.step(from, preferred) == to {
            return Some(preferred);
        }
        self.direction_between(from, to)
    }

    /// Iterate every cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position { row, col }))
    }
}
