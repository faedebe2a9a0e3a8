//! Score module - points from size changes, with a best score
//!
//! Every segment gained is worth one point and every segment lost costs one.
//! The score never goes below zero. The best score only moves up; callers may
//! seed it from their own storage.

use crate::types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    score: u32,
    best: u32,
}

impl Scoreboard {
    pub fn new(best: u32) -> Self {
        Self { score: 0, best }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Add `points` (may be negative), floored at zero
    pub fn add(&mut self, points: i32) {
        let next = i64::from(self.score) + i64::from(points);
        self.score = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
        self.best = self.best.max(self.score);
    }

    /// Feed one core event; only size changes score
    pub fn apply(&mut self, event: &GameEvent) {
        if let GameEvent::SizeChanged { delta } = event {
            self.add(i32::from(*delta));
        }
    }

    /// Start a new round, keeping the best score
    pub fn reset(&mut self) {
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemKind;

    #[test]
    fn test_score_is_floored_at_zero() {
        let mut s = Scoreboard::default();
        s.add(-1);
        assert_eq!(s.score(), 0);
        s.add(2);
        s.add(-5);
        assert_eq!(s.score(), 0);
        assert_eq!(s.best(), 2);
    }

    #[test]
    fn test_only_size_changes_score() {
        let mut s = Scoreboard::new(0);
        s.apply(&GameEvent::SizeChanged { delta: 1 });
        s.apply(&GameEvent::SizeChanged { delta: 1 });
        s.apply(&GameEvent::effect(ItemKind::Edible));
        s.apply(&GameEvent::SnakeDied);
        s.apply(&GameEvent::SizeChanged { delta: -1 });
        assert_eq!(s.score(), 1);
        assert_eq!(s.best(), 2);
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut s = Scoreboard::new(10);
        s.add(3);
        assert_eq!(s.best(), 10);
        s.add(9);
        assert_eq!(s.best(), 12);
        s.reset();
        assert_eq!(s.score(), 0);
        assert_eq!(s.best(), 12);
    }
}
