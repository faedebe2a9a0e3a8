//! Terminal snake runner (default binary).
//!
//! Runs one session on the tokio clock and drives it from the keyboard.
//! The terminal shows a status line and effect messages; drawing the board is
//! left to richer front-ends built on `GameSnapshot`.
//!
//! Environment: `SNAKE_*` variables configure the game (see `GameConfig`),
//! `SNAKE_LOG_PATH` enables file logging filtered by `RUST_LOG`.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_snake::core::{Game, GameConfig, GameSnapshot};
use tui_snake::engine::{spawn_session, SessionConfig, SessionSummary};
use tui_snake::input::{handle_key_event, should_quit, InputCommand};
use tui_snake::types::GameEvent;

const KEY_POLL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = GameConfig::from_env().context("invalid SNAKE_* configuration")?;
    let game = Game::new(config).context("failed to build game")?;

    terminal::enable_raw_mode().context("failed to enter raw mode")?;
    let result = run(game).await;

    // Always try to restore terminal state.
    let _ = terminal::disable_raw_mode();
    println!();

    let summary = result?;
    println!(
        "ticks: {}  rounds: {}  score: {}  best: {}",
        summary.ticks, summary.rounds, summary.score, summary.best
    );
    Ok(())
}

fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var("SNAKE_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(game: Game) -> Result<SessionSummary> {
    let mut session = spawn_session(game, SessionConfig::from_env());
    let mut snapshots = session.handle.snapshots();
    let mut keys = spawn_key_reader();
    let mut out = io::stdout();

    draw_status(&mut out, &snapshots.borrow_and_update())?;

    loop {
        tokio::select! {
            key = keys.recv() => {
                let Some(key) = key else { break };
                if should_quit(key) {
                    break;
                }
                let sent = match handle_key_event(key) {
                    Some(InputCommand::Turn(direction)) => session.handle.set_direction(direction),
                    Some(InputCommand::Start) => session.handle.start(),
                    Some(InputCommand::Restart) => session.handle.reset(),
                    None => Ok(()),
                };
                if let Err(e) = sent {
                    warn!("dropped key: {:#}", e);
                }
            }
            event = session.events.recv() => {
                let Some(event) = event else { break };
                match event {
                    GameEvent::EffectOccurred { message, .. } => print_line(&mut out, message)?,
                    GameEvent::SnakeDied => {
                        print_line(&mut out, "Game over! r: restart, q: quit")?
                    }
                    GameEvent::SizeChanged { .. } => {}
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                draw_status(&mut out, &snapshots.borrow_and_update())?;
            }
        }
    }

    info!("quit requested");
    // The task may already be gone if it failed; its result says why.
    let _ = session.handle.shutdown().await;
    drop(session.handle);
    session.task.await.context("session task panicked")?
}

/// Read terminal keys on a blocking thread until the receiver goes away
fn spawn_key_reader() -> mpsc::UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(KEY_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(_) => break,
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
    rx
}

fn draw_status(out: &mut impl Write, snap: &GameSnapshot) -> Result<()> {
    let head = snap
        .head()
        .map(|h| format!("({}, {}) {}", h.position.row, h.position.col, h.facing.as_str()))
        .unwrap_or_default();
    let status = format!(
        "[{}] score {} best {} | length {} | speed {:.2} | head {} | items {}",
        snap.state.as_str(),
        snap.score,
        snap.best,
        snap.length,
        snap.current_speed,
        head,
        snap.items.len()
    );
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(status)
    )?;
    Ok(())
}

fn print_line(out: &mut impl Write, text: &str) -> Result<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(text),
        Print("\r\n")
    )?;
    Ok(())
}
