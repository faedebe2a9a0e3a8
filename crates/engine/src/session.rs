//! Session module - drives one [`Game`] on the tokio clock.
//!
//! A session is a single task that owns the game outright. Everything else
//! talks to it through a bounded command queue ([`SessionHandle`]) and listens
//! on two channels: an unbounded stream of [`GameEvent`]s and a watch channel
//! that always holds the latest [`GameSnapshot`].
//!
//! The task waits on three things at once:
//! - commands, applied as they arrive
//! - the speed modifier deadline, re-armed whenever the modifier changes
//! - the tick deadline, one `tick_interval` after the previous tick
//!
//! When the tick deadline fires, commands already queued are drained first so
//! a turn issued during the interval lands on exactly the next advance.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use tui_snake_core::{Game, GameSnapshot};
use tui_snake_types::{Direction, EngineState, GameEvent};

/// Default capacity of the command queue
pub const DEFAULT_MAX_PENDING_COMMANDS: usize = 64;

/// Session tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Command queue capacity
    pub max_pending_commands: usize,
    /// Start the game as soon as the session (or a reset) begins
    pub auto_start: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_pending_commands: DEFAULT_MAX_PENDING_COMMANDS,
            auto_start: true,
        }
    }
}

impl SessionConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        use std::env;

        let max_pending_commands = env::var("SNAKE_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_PENDING_COMMANDS);

        let auto_start = env::var("SNAKE_AUTO_START")
            .map(|v| !(v == "0" || v.to_lowercase() == "false"))
            .unwrap_or(true);

        Self {
            max_pending_commands,
            auto_start,
        }
    }
}

/// Command delivered to the session task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    SetDirection(Direction),
    /// Begin an idle round; ignored once the round is running or over
    Start,
    Reset,
    Shutdown,
}

/// Totals reported when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Ticks across every round
    pub ticks: u64,
    pub rounds: u32,
    pub score: u32,
    pub best: u32,
}

/// Cloneable control surface of a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
}

impl SessionHandle {
    /// Buffer a direction for the next tick
    pub fn set_direction(&self, direction: Direction) -> Result<()> {
        self.send(SessionCommand::SetDirection(direction))
    }

    /// Start an idle round
    pub fn start(&self) -> Result<()> {
        self.send(SessionCommand::Start)
    }

    /// Rebuild the game and start a new round
    pub fn reset(&self) -> Result<()> {
        self.send(SessionCommand::Reset)
    }

    /// Ask the task to finish; waits for queue space
    pub async fn shutdown(&self) -> Result<()> {
        self.commands
            .send(SessionCommand::Shutdown)
            .await
            .context("session already finished")
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every new snapshot
    pub fn snapshots(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    fn send(&self, command: SessionCommand) -> Result<()> {
        self.commands
            .try_send(command)
            .with_context(|| format!("session rejected {:?}", command))
    }
}

/// A spawned session and its outputs
pub struct Session {
    pub handle: SessionHandle,
    pub events: mpsc::UnboundedReceiver<GameEvent>,
    pub task: JoinHandle<Result<SessionSummary>>,
}

/// Spawn a task that owns `game` and runs it on the tokio clock
///
/// Must be called from within a tokio runtime.
pub fn spawn_session(game: Game, config: SessionConfig) -> Session {
    let (cmd_tx, cmd_rx) = mpsc::channel(config.max_pending_commands.max(1));
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(game.snapshot());

    let runner = SessionRunner {
        game,
        config,
        commands: cmd_rx,
        events: event_tx,
        snapshots: snapshot_tx,
        total_ticks: 0,
    };
    let task = tokio::spawn(runner.run());

    Session {
        handle: SessionHandle {
            commands: cmd_tx,
            snapshots: snapshot_rx,
        },
        events: event_rx,
        task,
    }
}

enum Flow {
    Continue,
    Restart,
    Finish,
}

/// Armed speed modifier expiry
#[derive(Debug, Clone, Copy)]
struct ModifierTimer {
    generation: u64,
    deadline: Option<Instant>,
}

struct SessionRunner {
    game: Game,
    config: SessionConfig,
    commands: mpsc::Receiver<SessionCommand>,
    events: mpsc::UnboundedSender<GameEvent>,
    snapshots: watch::Sender<GameSnapshot>,
    total_ticks: u64,
}

impl SessionRunner {
    async fn run(mut self) -> Result<SessionSummary> {
        if self.config.auto_start {
            self.game.start();
        }
        info!(
            round = self.game.round(),
            interval_ms = self.game.tick_interval().as_millis() as u64,
            "session started"
        );
        self.publish();

        let mut tick_deadline = Instant::now() + self.game.tick_interval();
        let mut epoch = self.game.schedule_epoch();
        let mut modifier = self.modifier_timer(Instant::now());

        loop {
            let running = self.game.is_running();
            let modifier_deadline = modifier.deadline;

            tokio::select! {
                biased;

                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("all session handles dropped");
                        break;
                    };
                    match self.apply(command)? {
                        Flow::Continue => {}
                        Flow::Finish => break,
                        Flow::Restart => {
                            let now = Instant::now();
                            tick_deadline = now + self.game.tick_interval();
                            epoch = self.game.schedule_epoch();
                            modifier = self.modifier_timer(now);
                            self.publish();
                        }
                    }
                }

                _ = sleep_until(modifier_deadline.unwrap_or(tick_deadline)), if modifier_deadline.is_some() => {
                    self.game.expire_speed_modifier();
                    modifier = self.modifier_timer(Instant::now());
                    debug!(speed = self.game.engine().speed().current(), "speed modifier expired");
                    self.publish();
                }

                _ = sleep_until(tick_deadline), if running => {
                    let mut flow = Flow::Continue;
                    while let Ok(command) = self.commands.try_recv() {
                        flow = self.apply(command)?;
                        if !matches!(flow, Flow::Continue) {
                            break;
                        }
                    }
                    match flow {
                        Flow::Finish => break,
                        Flow::Restart => {
                            let now = Instant::now();
                            tick_deadline = now + self.game.tick_interval();
                            epoch = self.game.schedule_epoch();
                            modifier = self.modifier_timer(now);
                            self.publish();
                            continue;
                        }
                        Flow::Continue => {}
                    }

                    let outcome = self.game.step().context("session tick failed")?;
                    self.total_ticks += 1;
                    for event in outcome.events {
                        // A listener that went away does not stop the game.
                        let _ = self.events.send(event);
                    }

                    let now = Instant::now();
                    if self.game.speed_generation() != modifier.generation {
                        modifier = self.modifier_timer(now);
                    }
                    if self.game.schedule_epoch() != epoch {
                        epoch = self.game.schedule_epoch();
                        debug!("tick timer restarted");
                    }
                    tick_deadline = now + self.game.tick_interval();

                    if self.game.is_over() {
                        info!(
                            score = self.game.scoreboard().score(),
                            best = self.game.scoreboard().best(),
                            "game over, waiting for reset"
                        );
                    }
                    self.publish();
                }
            }
        }

        let summary = SessionSummary {
            ticks: self.total_ticks,
            rounds: self.game.round() + 1,
            score: self.game.scoreboard().score(),
            best: self.game.scoreboard().best(),
        };
        info!(
            ticks = summary.ticks,
            rounds = summary.rounds,
            best = summary.best,
            "session finished"
        );
        Ok(summary)
    }

    fn apply(&mut self, command: SessionCommand) -> Result<Flow> {
        debug!(?command, "session command");
        match command {
            SessionCommand::SetDirection(direction) => {
                self.game.set_direction(direction);
                Ok(Flow::Continue)
            }
            SessionCommand::Start => {
                if self.game.state() != EngineState::Idle {
                    return Ok(Flow::Continue);
                }
                self.game.start();
                Ok(Flow::Restart)
            }
            SessionCommand::Reset => {
                self.game.reset().context("failed to reset game")?;
                if self.config.auto_start {
                    self.game.start();
                }
                Ok(Flow::Restart)
            }
            SessionCommand::Shutdown => Ok(Flow::Finish),
        }
    }

    fn modifier_timer(&self, now: Instant) -> ModifierTimer {
        ModifierTimer {
            generation: self.game.speed_generation(),
            deadline: self
                .game
                .modifier_remaining()
                .map(|remaining: Duration| now + remaining),
        }
    }

    fn publish(&self) {
        self.snapshots.send_modify(|s| self.game.snapshot_into(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_snake_core::{GameConfig, Item};
    use tui_snake_types::{ItemKind, Position};

    fn game(config: GameConfig) -> Game {
        Game::new(GameConfig {
            board_size: 16,
            max_items: 0,
            ..config
        })
        .unwrap()
    }

    fn quiet() -> GameConfig {
        GameConfig {
            base_speed: 4.0,
            ..GameConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_interval() {
        let session = spawn_session(game(quiet()), SessionConfig::default());

        tokio::time::sleep(Duration::from_millis(260)).await;
        assert_eq!(session.handle.snapshot().ticks, 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        let snap = session.handle.snapshot();
        assert_eq!(snap.ticks, 3);
        assert_eq!(snap.head().unwrap().position, Position::new(0, 6));

        session.handle.shutdown().await.unwrap();
        let summary = session.task.await.unwrap().unwrap();
        assert_eq!(summary.ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_direction_lands_on_next_tick() {
        let session = spawn_session(game(quiet()), SessionConfig::default());

        tokio::time::sleep(Duration::from_millis(100)).await;
        session.handle.set_direction(Direction::Down).unwrap();
        session.handle.set_direction(Direction::Up).unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        let head = session.handle.snapshot().head().unwrap();
        assert_eq!(head.position, Position::new(1, 3));
        assert_eq!(head.facing, Direction::Up);

        session.handle.shutdown().await.unwrap();
        session.task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_does_not_tick() {
        let config = SessionConfig {
            auto_start: false,
            ..SessionConfig::default()
        };
        let session = spawn_session(game(quiet()), config);

        tokio::time::sleep(Duration::from_secs(2)).await;
        let snap = session.handle.snapshot();
        assert_eq!(snap.ticks, 0);
        assert_eq!(snap.state, EngineState::Idle);

        drop(session.handle);
        let summary = session.task.await.unwrap().unwrap();
        assert_eq!(summary.ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_command_begins_idle_round() {
        let config = SessionConfig {
            auto_start: false,
            ..SessionConfig::default()
        };
        let session = spawn_session(game(quiet()), config);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        session.handle.start().unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        let snap = session.handle.snapshot();
        assert_eq!(snap.state, EngineState::Running);
        assert_eq!(snap.ticks, 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let snap = session.handle.snapshot();
        assert_eq!(snap.ticks, 1);
        assert_eq!(snap.head().unwrap().position, Position::new(0, 4));

        // A second start does not restart the tick timer.
        session.handle.start().unwrap();
        tokio::time::sleep(Duration::from_millis(210)).await;
        assert_eq!(session.handle.snapshot().ticks, 2);

        session.handle.shutdown().await.unwrap();
        let summary = session.task.await.unwrap().unwrap();
        assert_eq!(summary.ticks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_modifier_expires_on_its_own_timer() {
        let mut g = game(GameConfig {
            speed_change_amount: 2.0,
            speed_change_duration_ms: 1000,
            ..quiet()
        });
        g.items_mut().place(Item {
            kind: ItemKind::SpeedUp,
            position: Position::new(0, 4),
        });
        let mut session = spawn_session(g, SessionConfig::default());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(session.handle.snapshot().current_speed, 8.0);
        assert_eq!(
            session.events.recv().await,
            Some(GameEvent::effect(ItemKind::SpeedUp))
        );

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(session.handle.snapshot().current_speed, 8.0);

        tokio::time::sleep(Duration::from_millis(300)).await;
        let snap = session.handle.snapshot();
        assert_eq!(snap.current_speed, snap.base_speed);

        session.handle.shutdown().await.unwrap();
        session.task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_then_reset() {
        let mut session = spawn_session(game(quiet()), SessionConfig::default());

        session.handle.set_direction(Direction::Left).unwrap();
        assert_eq!(session.events.recv().await, Some(GameEvent::SnakeDied));
        assert!(session.handle.snapshot().is_over());

        // Stopped sessions stay put until reset.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(session.handle.snapshot().ticks, 1);

        session.handle.reset().unwrap();
        tokio::time::sleep(Duration::from_millis(260)).await;
        let snap = session.handle.snapshot();
        assert_eq!(snap.state, EngineState::Running);
        assert_eq!(snap.ticks, 1);
        assert_eq!(snap.head().unwrap().position, Position::new(0, 4));

        session.handle.shutdown().await.unwrap();
        let summary = session.task.await.unwrap().unwrap();
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.ticks, 2);
    }
}
