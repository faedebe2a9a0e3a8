//! Item field module - interactive items on the board
//!
//! The field keeps up to `max_count` items on distinct cells. Spawning is
//! attempted once per step with a bounded number of random draws, so a board
//! that is nearly full of snake simply gets no new item that step. When the
//! head lands on an item, the item is removed and exactly one engine action
//! runs, followed by an [`GameEvent::EffectOccurred`] notification.

use tracing::debug;

use crate::chain::Chain;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::rng::ItemRng;
use crate::snake::SnakeEngine;
use crate::types::{GameEvent, ItemKind, Position};

/// An item lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub kind: ItemKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemField {
    items: Vec<Item>,
    max_count: usize,
    min_distance: u16,
}

impl ItemField {
    pub fn new(max_count: usize, min_distance: u16) -> Self {
        Self {
            items: Vec::with_capacity(max_count),
            max_count,
            min_distance,
        }
    }

    /// Reject settings that can never place an item
    pub fn validate(max_count: usize, grid: &Grid) -> Result<(), ConfigError> {
        if max_count >= grid.cell_count() {
            return Err(ConfigError::InvalidItemSettings(format!(
                "max_items {} must be below the {} cells of the board",
                max_count,
                grid.cell_count()
            )));
        }
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn min_distance(&self) -> u16 {
        self.min_distance
    }

    pub fn item_at(&self, position: Position) -> Option<Item> {
        self.items.iter().copied().find(|i| i.position == position)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Place an item directly, bypassing the spawn rules
    ///
    /// Returns false if the cell already holds an item.
    pub fn place(&mut self, item: Item) -> bool {
        if self.item_at(item.position).is_some() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Try to top the field up to `max_count`
    ///
    /// Makes at most `2 * max_count` random draws and returns how many items
    /// were placed.
    pub fn try_spawn(&mut self, grid: &Grid, chain: &Chain, rng: &mut ItemRng) -> usize {
        let max_attempts = 2 * self.max_count;
        let head = chain.head().position;
        let mut attempts = 0;
        let mut spawned = 0;

        while self.items.len() < self.max_count && attempts < max_attempts {
            attempts += 1;
            let cell = rng.next_cell(grid);

            if chain.occupies(cell)
                || self.item_at(cell).is_some()
                || self.is_too_close(cell, head)
            {
                continue;
            }

            let item = Item {
                kind: rng.next_kind(),
                position: cell,
            };
            debug!(kind = item.kind.as_str(), row = cell.row, col = cell.col, "item spawned");
            self.items.push(item);
            spawned += 1;
        }

        spawned
    }

    /// Too close only when both axes are within `min_distance` of the head
    pub fn is_too_close(&self, cell: Position, head: Position) -> bool {
        let row_distance = cell.row.abs_diff(head.row);
        let col_distance = cell.col.abs_diff(head.col);
        row_distance < self.min_distance && col_distance < self.min_distance
    }

    /// Consume the item under the head, if any, and apply its effect
    pub fn resolve_contact(&mut self, engine: &mut SnakeEngine) -> Option<ItemKind> {
        let head = engine.head_position();
        let index = self.items.iter().position(|i| i.position == head)?;
        let item = self.items.swap_remove(index);

        match item.kind {
            ItemKind::Edible => engine.add_segment(),
            ItemKind::Inedible => engine.remove_segment(),
            ItemKind::SpeedUp => engine.speed_up_action(),
            ItemKind::SlowDown => engine.slow_down_action(),
            ItemKind::HeadTailSwap => engine.head_tail_swap_action(),
        }
        engine.emit(GameEvent::effect(item.kind));
        debug!(kind = item.kind.as_str(), "item consumed");

        Some(item.kind)
    }
}
