//! Game module - one board: snake, items, randomness and score
//!
//! [`Game`] composes the pieces of the simulation and defines what one step
//! means: tick the engine, and if the snake survived, top up the item field
//! and resolve whatever the head landed on. Events raised along the way are
//! scored and handed back to the caller in order.
//!
//! The game is clock-free. Drivers decide when to call [`Game::step`] (using
//! [`Game::tick_interval`]) and when a speed modifier runs out (using
//! [`Game::elapse`] or [`Game::expire_speed_modifier`]).

use std::time::Duration;

use arrayvec::ArrayVec;
use tracing::info;

use crate::chain::Chain;
use crate::config::GameConfig;
use crate::error::Result;
use crate::items::ItemField;
use crate::rng::ItemRng;
use crate::score::Scoreboard;
use crate::snake::SnakeEngine;
use crate::snapshot::{GameSnapshot, ItemSnapshot, SegmentSnapshot};
use crate::types::{Direction, EngineState, GameEvent, ItemKind, MAX_EVENTS_PER_STEP};

/// What happened during one [`Game::step`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    pub events: ArrayVec<GameEvent, MAX_EVENTS_PER_STEP>,
    /// Item the head consumed this step, if any
    pub consumed: Option<ItemKind>,
}

impl StepOutcome {
    pub fn died(&self) -> bool {
        self.events.contains(&GameEvent::SnakeDied)
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    engine: SnakeEngine,
    items: ItemField,
    rng: ItemRng,
    score: Scoreboard,
    /// Incremented on every reset
    round: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let engine = Self::build_engine(&config)?;
        Ok(Self::assemble(config, engine))
    }

    /// Build a game around an explicit chain (head first)
    pub fn with_chain(config: GameConfig, chain: Chain) -> Result<Self> {
        config.validate()?;
        let engine = SnakeEngine::with_chain(config.grid()?, chain, config.speed_settings())?;
        Ok(Self::assemble(config, engine))
    }

    fn build_engine(config: &GameConfig) -> Result<SnakeEngine> {
        SnakeEngine::new(
            config.grid()?,
            config.start_position(),
            config.start_direction,
            config.speed_settings(),
        )
    }

    fn assemble(config: GameConfig, engine: SnakeEngine) -> Self {
        Self {
            items: ItemField::new(config.max_items, config.min_item_distance),
            rng: ItemRng::new(config.seed),
            score: Scoreboard::new(config.best_score),
            config,
            engine,
            round: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &SnakeEngine {
        &self.engine
    }

    pub fn items(&self) -> &ItemField {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemField {
        &mut self.items
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.score
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn is_over(&self) -> bool {
        self.engine.state() == EngineState::Stopped
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn ticks(&self) -> u64 {
        self.engine.ticks()
    }

    pub fn tick_interval(&self) -> Duration {
        self.engine.tick_interval()
    }

    /// Changes whenever the active speed modifier does
    pub fn speed_generation(&self) -> u64 {
        self.engine.speed().generation()
    }

    /// Time left on the active speed modifier
    pub fn modifier_remaining(&self) -> Option<Duration> {
        self.engine.speed().modifier_remaining()
    }

    /// Changes whenever the tick timer must be restarted
    pub fn schedule_epoch(&self) -> u64 {
        self.engine.schedule_epoch()
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.engine.set_pending_direction(direction);
    }

    /// Rebuild the snake and clear the board
    ///
    /// The best score and the RNG stream carry over; the new round is idle.
    pub fn reset(&mut self) -> Result<()> {
        self.engine = Self::build_engine(&self.config)?;
        self.items.clear();
        self.score.reset();
        self.round = self.round.wrapping_add(1);
        info!(round = self.round, best = self.score.best(), "game reset");
        Ok(())
    }

    /// Run one tick of the game
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.engine.tick()?;

        let mut consumed = None;
        if self.engine.is_running() {
            self.items
                .try_spawn(self.engine.grid(), self.engine.chain(), &mut self.rng);
            consumed = self.items.resolve_contact(&mut self.engine);
        }

        let events = self.engine.take_events();
        for event in &events {
            self.score.apply(event);
        }

        Ok(StepOutcome { events, consumed })
    }

    /// Count `elapsed` against the active speed modifier
    pub fn elapse(&mut self, elapsed: Duration) -> bool {
        self.engine.elapse(elapsed)
    }

    pub fn expire_speed_modifier(&mut self) {
        self.engine.expire_speed_modifier();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board_size = self.engine.grid().size();

        out.segments.clear();
        out.segments
            .extend(self.engine.chain().segments().iter().map(|s| SegmentSnapshot {
                position: s.position,
                facing: s.facing,
            }));

        out.items.clear();
        out.items
            .extend(self.items.items().iter().map(|i| ItemSnapshot {
                kind: i.kind,
                position: i.position,
            }));

        out.state = self.engine.state();
        out.score = self.score.score();
        out.best = self.score.best();
        out.base_speed = self.engine.speed().base();
        out.current_speed = self.engine.speed().current();
        out.length = self.engine.len();
        out.ticks = self.engine.ticks();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
