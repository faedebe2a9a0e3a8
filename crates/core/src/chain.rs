//! Chain module - the snake body and its movement algorithm
//!
//! A chain is an ordered list of segments, index 0 being the head and the
//! last index the tail. Each [`Chain::advance`] moves the head one cell and
//! drags every following segment into the cell its predecessor just left, so
//! segment `i` always trails the head by exactly `i` ticks.
//!
//! Propagation stops early at the first segment that already sits on the cell
//! it would move to. That happens while a freshly stacked chain unspools, and
//! right after [`Chain::grow`] inserts a segment on top of its neighbour: the
//! tail then holds still for one tick and the snake lengthens at its end.

use crate::grid::Grid;
use crate::types::{Direction, Position};

/// One body cell with the direction it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub position: Position,
    pub facing: Direction,
}

impl Segment {
    pub const fn new(position: Position, facing: Direction) -> Self {
        Self { position, facing }
    }
}

/// Ordered head→tail list of segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    segments: Vec<Segment>,
}

impl Chain {
    /// Create `len` segments stacked on one cell, all facing `facing`
    pub fn stacked(position: Position, facing: Direction, len: usize) -> Self {
        Self {
            segments: vec![Segment::new(position, facing); len],
        }
    }

    /// Build a chain from explicit segments (head first)
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Head segment
    ///
    /// # Panics
    ///
    /// Panics on an empty chain; the engine never holds one.
    pub fn head(&self) -> Segment {
        self.segments[0]
    }

    /// Tail segment
    ///
    /// # Panics
    ///
    /// Panics on an empty chain; the engine never holds one.
    pub fn tail(&self) -> Segment {
        self.segments[self.segments.len() - 1]
    }

    /// Check if any segment covers `position`
    pub fn occupies(&self, position: Position) -> bool {
        self.segments.iter().any(|s| s.position == position)
    }

    /// Move the head one cell in `direction` and propagate down the body
    pub fn advance(&mut self, grid: &Grid, direction: Direction) {
        let Some(head) = self.segments.first_mut() else {
            return;
        };

        let mut prev_position = head.position;
        let mut prev_facing = head.facing;
        head.position = grid.step(head.position, direction);
        head.facing = direction;

        let last = self.segments.len() - 1;
        for i in 1..=last {
            let current = self.segments[i];

            // Already on the target cell: nothing behind it can move either.
            if current.position == prev_position {
                break;
            }

            let facing = if i == last {
                let ahead = self.segments[i - 1];
                grid.direction_toward(prev_position, ahead.position, ahead.facing)
                    .unwrap_or(ahead.facing)
            } else {
                prev_facing
            };

            self.segments[i] = Segment::new(prev_position, facing);
            prev_position = current.position;
            prev_facing = current.facing;
        }
    }

    /// True iff the head shares its cell with any other segment
    pub fn is_self_intersecting(&self) -> bool {
        let Some((head, body)) = self.segments.split_first() else {
            return false;
        };
        body.iter().any(|s| s.position == head.position)
    }

    /// Insert a copy of the second-to-last segment just before the tail
    pub fn grow(&mut self) {
        let len = self.segments.len();
        if len < 2 {
            return;
        }
        let body = self.segments[len - 2];
        self.segments.insert(len - 1, body);
    }

    /// Remove the second-to-last segment, keeping the tail where it is
    pub fn shrink(&mut self) {
        let len = self.segments.len();
        if len < 2 {
            return;
        }
        self.segments.remove(len - 2);
    }

    /// Reverse segment order in place and flip every facing
    pub fn reverse(&mut self) {
        self.segments.reverse();
        for segment in &mut self.segments {
            segment.facing = segment.facing.opposite();
        }
    }
}
