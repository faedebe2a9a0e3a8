//! Snake engine module - the chain plus its state machine
//!
//! The engine owns the chain, the buffered direction and the speed state, and
//! implements every mutation the rest of the game may request: ticking,
//! growing, shrinking, timed speed changes and the head-tail swap.
//!
//! Lifecycle: `Idle` (built, unspooled, not moving) → `Running` (ticks
//! accepted) → `Stopped` (terminal). Game over is a transition paired with a
//! [`GameEvent::SnakeDied`] event, never an error; ticking an engine that is
//! not running is rejected with [`Error::TickRejected`].
//!
//! Events are buffered in the engine and drained with
//! [`SnakeEngine::take_events`] once per step.

use std::time::Duration;

use arrayvec::ArrayVec;
use tracing::{debug, info, warn};

use crate::chain::{Chain, Segment};
use crate::error::{ConfigError, Error, Result};
use crate::grid::Grid;
use crate::speed::{SpeedSettings, SpeedState};
use crate::types::{
    Direction, EngineState, GameEvent, Position, MAX_EVENTS_PER_STEP, MIN_LENGTH, UNSPOOL_STEPS,
};

/// Events buffered between two drains
pub type EventBuffer = ArrayVec<GameEvent, MAX_EVENTS_PER_STEP>;

#[derive(Debug, Clone)]
pub struct SnakeEngine {
    grid: Grid,
    chain: Chain,
    pending: Direction,
    state: EngineState,
    speed: SpeedState,
    settings: SpeedSettings,
    /// Ticks executed since `start`
    ticks: u64,
    /// Bumped whenever the scheduler must restart its tick timer
    schedule_epoch: u64,
    events: EventBuffer,
}

impl SnakeEngine {
    /// Build a 3-segment snake stacked at `start` and unspool it in `direction`
    pub fn new(
        grid: Grid,
        start: Position,
        direction: Direction,
        settings: SpeedSettings,
    ) -> Result<Self> {
        if !grid.contains(start) {
            return Err(ConfigError::StartOutOfBounds {
                position: start,
                size: grid.size(),
            }
            .into());
        }
        settings.validate()?;

        let mut chain = Chain::stacked(start, direction, MIN_LENGTH);
        for _ in 0..UNSPOOL_STEPS {
            chain.advance(&grid, direction);
        }

        Ok(Self::assemble(grid, chain, settings))
    }

    /// Build an engine around an explicit chain (head first)
    pub fn with_chain(grid: Grid, chain: Chain, settings: SpeedSettings) -> Result<Self> {
        if chain.len() < MIN_LENGTH {
            return Err(ConfigError::InvalidChain(format!(
                "length {} is below the minimum of {}",
                chain.len(),
                MIN_LENGTH
            ))
            .into());
        }
        if let Some(off) = chain.segments().iter().find(|s| !grid.contains(s.position)) {
            return Err(ConfigError::StartOutOfBounds {
                position: off.position,
                size: grid.size(),
            }
            .into());
        }
        settings.validate()?;

        Ok(Self::assemble(grid, chain, settings))
    }

    fn assemble(grid: Grid, chain: Chain, settings: SpeedSettings) -> Self {
        let pending = chain.head().facing;
        Self {
            grid,
            chain,
            pending,
            state: EngineState::Idle,
            speed: SpeedState::new(settings.base_speed),
            settings,
            ticks: 0,
            schedule_epoch: 0,
            events: EventBuffer::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn head(&self) -> Segment {
        self.chain.head()
    }

    pub fn head_position(&self) -> Position {
        self.chain.head().position
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn speed(&self) -> &SpeedState {
        &self.speed
    }

    pub fn settings(&self) -> &SpeedSettings {
        &self.settings
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn schedule_epoch(&self) -> u64 {
        self.schedule_epoch
    }

    pub fn tick_interval(&self) -> Duration {
        self.speed.tick_interval()
    }

    /// Begin accepting ticks at base speed
    pub fn start(&mut self) {
        if self.state != EngineState::Idle {
            return;
        }
        self.speed.restart();
        self.state = EngineState::Running;
        info!(
            len = self.chain.len(),
            speed = self.speed.current(),
            "snake started"
        );
    }

    /// Explicit stop. Terminal, but not a death: no event is emitted.
    pub fn stop(&mut self) {
        if self.state == EngineState::Stopped {
            return;
        }
        self.state = EngineState::Stopped;
        self.speed.expire();
        info!(ticks = self.ticks, "snake stopped");
    }

    /// Buffer the direction for the next tick (last write wins)
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending = direction;
    }

    /// Advance one cell in the pending direction and check for self-collision
    pub fn tick(&mut self) -> Result<()> {
        if self.state != EngineState::Running {
            return Err(Error::TickRejected { state: self.state });
        }

        self.chain.advance(&self.grid, self.pending);
        self.pending = self.chain.head().facing;
        self.ticks = self.ticks.wrapping_add(1);

        if self.chain.is_self_intersecting() {
            debug!(head = ?self.head_position(), "head ran into body");
            self.game_over();
        }
        Ok(())
    }

    /// Lengthen the snake by one segment just before the tail
    pub fn add_segment(&mut self) {
        self.chain.grow();
        self.emit(GameEvent::SizeChanged { delta: 1 });
    }

    /// Shorten the snake by one segment; at minimum length this ends the game
    pub fn remove_segment(&mut self) {
        if self.chain.len() <= MIN_LENGTH {
            self.game_over();
            return;
        }
        self.chain.shrink();
        self.emit(GameEvent::SizeChanged { delta: -1 });
    }

    /// Run at `base * change_amount` for the configured duration
    pub fn speed_up_action(&mut self) {
        self.speed
            .install(self.settings.change_amount, self.settings.change_duration);
        debug!(speed = self.speed.current(), "speed up");
    }

    /// Run at `base / change_amount` for the configured duration
    pub fn slow_down_action(&mut self) {
        self.speed.install(
            1.0 / self.settings.change_amount,
            self.settings.change_duration,
        );
        debug!(speed = self.speed.current(), "slow down");
    }

    /// Reverse the snake so the tail leads, then restart at base speed
    pub fn head_tail_swap_action(&mut self) {
        let was_running = self.state == EngineState::Running;
        if was_running {
            self.state = EngineState::Idle;
        }

        self.chain.reverse();
        self.pending = self.chain.head().facing;

        self.speed.restart();
        self.schedule_epoch = self.schedule_epoch.wrapping_add(1);
        if was_running {
            self.state = EngineState::Running;
        }
        debug!(
            head = ?self.head_position(),
            facing = self.pending.as_str(),
            "head and tail swapped"
        );
    }

    /// Count `elapsed` against the active speed modifier
    pub fn elapse(&mut self, elapsed: Duration) -> bool {
        self.speed.elapse(elapsed)
    }

    /// End the active speed modifier now
    pub fn expire_speed_modifier(&mut self) {
        self.speed.expire();
    }

    /// Queue an event for collaborators
    pub fn emit(&mut self, event: GameEvent) {
        if self.events.try_push(event).is_err() {
            warn!(?event, "event buffer full, dropping event");
        }
    }

    /// Drain buffered events
    pub fn take_events(&mut self) -> EventBuffer {
        std::mem::take(&mut self.events)
    }

    fn game_over(&mut self) {
        if self.state == EngineState::Stopped {
            return;
        }
        self.state = EngineState::Stopped;
        self.speed.expire();
        info!(len = self.chain.len(), ticks = self.ticks, "snake died");
        self.emit(GameEvent::SnakeDied);
    }
}
