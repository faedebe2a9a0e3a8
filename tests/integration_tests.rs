//! Integration tests for the game step loop

use std::time::Duration;

use tui_snake::core::{Chain, Error, Game, GameConfig, Item, Segment};
use tui_snake::types::{Direction, EngineState, GameEvent, ItemKind, Position};

fn config(size: u16) -> GameConfig {
    GameConfig {
        board_size: size,
        max_items: 0,
        ..GameConfig::default()
    }
}

fn place(game: &mut Game, kind: ItemKind, row: u16, col: u16) {
    assert!(game.items_mut().place(Item {
        kind,
        position: Position::new(row, col),
    }));
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(config(4)).unwrap();
    assert_eq!(game.state(), EngineState::Idle);
    assert!(matches!(game.step(), Err(Error::TickRejected { .. })));

    game.start();
    let outcome = game.step().unwrap();
    assert!(outcome.events.is_empty());
    assert_eq!(game.engine().head_position(), Position::new(0, 0));

    game.stop();
    assert_eq!(game.state(), EngineState::Stopped);
    assert!(matches!(
        game.step(),
        Err(Error::TickRejected {
            state: EngineState::Stopped
        })
    ));
}

#[test]
fn test_each_item_runs_exactly_one_action() {
    let mut game = Game::new(config(16)).unwrap();
    game.start();
    place(&mut game, ItemKind::Edible, 0, 4);
    place(&mut game, ItemKind::Edible, 0, 5);
    place(&mut game, ItemKind::Inedible, 0, 6);
    place(&mut game, ItemKind::SlowDown, 0, 7);

    let outcome = game.step().unwrap();
    assert_eq!(outcome.consumed, Some(ItemKind::Edible));
    let outcome = game.step().unwrap();
    assert_eq!(outcome.consumed, Some(ItemKind::Edible));
    assert_eq!(game.engine().len(), 5);
    assert_eq!(game.scoreboard().score(), 2);

    let outcome = game.step().unwrap();
    assert_eq!(
        outcome.events.as_slice(),
        &[
            GameEvent::SizeChanged { delta: -1 },
            GameEvent::effect(ItemKind::Inedible)
        ]
    );
    assert_eq!(game.engine().len(), 4);
    assert_eq!(game.scoreboard().score(), 1);
    assert_eq!(game.scoreboard().best(), 2);

    let outcome = game.step().unwrap();
    assert_eq!(outcome.consumed, Some(ItemKind::SlowDown));
    assert!(game.tick_interval() > Duration::from_millis(250));
    assert!(game.items().is_empty());
}

#[test]
fn test_inedible_at_minimum_length_ends_game() {
    let mut game = Game::new(config(8)).unwrap();
    game.start();
    place(&mut game, ItemKind::Inedible, 0, 4);

    let outcome = game.step().unwrap();
    assert!(outcome.died());
    assert_eq!(
        outcome.events.as_slice(),
        &[GameEvent::SnakeDied, GameEvent::effect(ItemKind::Inedible)]
    );
    assert!(game.is_over());
    assert_eq!(game.scoreboard().score(), 0);
}

#[test]
fn test_head_tail_swap_through_the_game() {
    let chain = Chain::from_segments(vec![
        Segment::new(Position::new(0, 3), Direction::Right),
        Segment::new(Position::new(0, 2), Direction::Right),
        Segment::new(Position::new(0, 1), Direction::Right),
        Segment::new(Position::new(0, 0), Direction::Right),
    ]);
    let mut game = Game::with_chain(config(8), chain).unwrap();
    game.start();
    place(&mut game, ItemKind::SpeedUp, 0, 4);
    place(&mut game, ItemKind::HeadTailSwap, 0, 5);

    game.step().unwrap();
    assert!(game.modifier_remaining().is_some());
    let epoch = game.schedule_epoch();

    game.step().unwrap();
    assert_ne!(game.schedule_epoch(), epoch);
    assert!(game.modifier_remaining().is_none());
    assert_eq!(game.engine().head(), Segment::new(Position::new(0, 2), Direction::Left));

    game.step().unwrap();
    assert_eq!(game.engine().head_position(), Position::new(0, 1));
    assert!(game.is_running());
}

#[test]
fn test_same_seed_same_game() {
    let cfg = GameConfig {
        board_size: 12,
        max_items: 5,
        min_item_distance: 2,
        seed: 77,
        ..GameConfig::default()
    };
    let mut a = Game::new(cfg.clone()).unwrap();
    let mut b = Game::new(cfg).unwrap();
    a.start();
    b.start();

    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
    for t in 0..60 {
        if a.is_over() {
            break;
        }
        if t % 5 == 0 {
            a.set_direction(turns[(t / 5) % 4]);
            b.set_direction(turns[(t / 5) % 4]);
        }
        assert_eq!(a.step().unwrap(), b.step().unwrap());
        a.elapse(Duration::from_millis(250));
        b.elapse(Duration::from_millis(250));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_reset_after_game_over() {
    let mut game = Game::new(GameConfig {
        best_score: 7,
        ..config(8)
    })
    .unwrap();
    game.start();
    game.set_direction(Direction::Left);
    assert!(game.step().unwrap().died());

    game.reset().unwrap();
    game.start();
    assert!(game.step().is_ok());
    assert_eq!(game.scoreboard().best(), 7);
    assert_eq!(game.round(), 1);
}

#[test]
fn test_extreme_slow_down_keeps_a_usable_interval() {
    let mut game = Game::new(GameConfig {
        speed_change_amount: 1e30,
        ..config(8)
    })
    .unwrap();
    game.start();
    place(&mut game, ItemKind::SlowDown, 0, 4);

    assert_eq!(game.step().unwrap().consumed, Some(ItemKind::SlowDown));
    assert!(game.engine().speed().current() > 0.0);
    assert_eq!(game.tick_interval(), Duration::from_secs(1));
}
