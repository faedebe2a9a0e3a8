use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_snake::core::{Chain, Game, GameConfig, GameSnapshot, Grid, ItemField, ItemRng, Segment};
use tui_snake::types::{Direction, Position};

fn long_chain(len: u16) -> Chain {
    Chain::from_segments(
        (0..len)
            .map(|i| Segment::new(Position::new(0, len - 1 - i), Direction::Right))
            .collect(),
    )
}

fn bench_step(c: &mut Criterion) {
    let mut game = Game::new(GameConfig {
        board_size: 64,
        max_items: 0,
        ..GameConfig::default()
    })
    .unwrap();
    game.start();

    c.bench_function("game_step", |b| {
        b.iter(|| {
            let _ = black_box(game.step());
        })
    });
}

fn bench_chain_advance(c: &mut Criterion) {
    let grid = Grid::new(64).unwrap();
    let mut chain = long_chain(48);

    c.bench_function("chain_advance_48", |b| {
        b.iter(|| {
            chain.advance(&grid, black_box(Direction::Right));
        })
    });
}

fn bench_try_spawn(c: &mut Criterion) {
    let grid = Grid::new(16).unwrap();
    let chain = long_chain(16);
    let mut rng = ItemRng::new(12345);

    c.bench_function("try_spawn_empty_field", |b| {
        b.iter(|| {
            let mut field = ItemField::new(5, 3);
            black_box(field.try_spawn(&grid, &chain, &mut rng));
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let game = Game::with_chain(
        GameConfig {
            board_size: 64,
            ..GameConfig::default()
        },
        long_chain(48),
    )
    .unwrap();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_step,
    bench_chain_advance,
    bench_try_spawn,
    bench_snapshot_into
);
criterion_main!(benches);
