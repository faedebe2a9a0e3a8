//! Item spawning on crowded boards

use tui_snake::core::{Chain, Grid, ItemField, ItemRng, Segment};
use tui_snake::types::{Direction, Position};

/// Boustrophedon chain covering the first `cells` cells of an n×n board
fn serpent(n: u16, cells: usize) -> Chain {
    let mut segments = Vec::new();
    'rows: for row in 0..n {
        for i in 0..n {
            let col = if row % 2 == 0 { i } else { n - 1 - i };
            if segments.len() == cells {
                break 'rows;
            }
            segments.push(Segment::new(Position::new(row, col), Direction::Right));
        }
    }
    segments.reverse();
    Chain::from_segments(segments)
}

#[test]
fn test_nearly_full_board_spawns_at_most_the_free_cell() {
    let grid = Grid::new(4).unwrap();
    let chain = serpent(4, 15);
    let free = Position::new(3, 0);
    assert!(!chain.occupies(free));

    let mut field = ItemField::new(5, 0);
    let mut rng = ItemRng::new(9);
    for _ in 0..100 {
        let spawned = field.try_spawn(&grid, &chain, &mut rng);
        assert!(spawned <= 1);
    }

    assert!(field.len() <= 1);
    for item in field.items() {
        assert_eq!(item.position, free);
    }
}

#[test]
fn test_full_board_uses_exactly_the_attempt_budget() {
    let grid = Grid::new(4).unwrap();
    let chain = serpent(4, 16);
    let mut field = ItemField::new(5, 0);
    let mut rng = ItemRng::new(21);
    let mut shadow = rng.clone();

    assert_eq!(field.try_spawn(&grid, &chain, &mut rng), 0);
    assert!(field.is_empty());

    for _ in 0..10 {
        shadow.next_cell(&grid);
    }
    assert_eq!(rng.next_cell(&grid), shadow.next_cell(&grid));
}

#[test]
fn test_items_keep_away_from_the_head() {
    let grid = Grid::new(16).unwrap();
    let chain = Chain::stacked(Position::new(8, 8), Direction::Up, 3);
    let head = chain.head().position;
    let mut field = ItemField::new(5, 3);
    let mut rng = ItemRng::new(4);

    for _ in 0..30 {
        field.try_spawn(&grid, &chain, &mut rng);
    }
    assert_eq!(field.len(), 5);
    for item in field.items() {
        let close_rows = item.position.row.abs_diff(head.row) < 3;
        let close_cols = item.position.col.abs_diff(head.col) < 3;
        assert!(!(close_rows && close_cols), "{:?} is too close", item.position);
    }
}
