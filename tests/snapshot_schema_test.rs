use tui_snake::core::{Game, GameConfig, Item};
use tui_snake::types::{GameEvent, ItemKind, Position};

#[test]
fn snapshot_serializes_for_renderers() {
    let mut game = Game::new(GameConfig {
        board_size: 8,
        max_items: 0,
        ..GameConfig::default()
    })
    .unwrap();
    game.items_mut().place(Item {
        kind: ItemKind::HeadTailSwap,
        position: Position::new(5, 5),
    });

    let v = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(v["board_size"], 8);
    assert_eq!(v["state"], "idle");
    assert_eq!(v["length"], 3);
    assert_eq!(v["segments"][0]["position"]["row"], 0);
    assert_eq!(v["segments"][0]["position"]["col"], 3);
    assert_eq!(v["segments"][0]["facing"], "right");
    assert_eq!(v["items"][0]["kind"], "headTailSwap");
    assert!(v.get("current_speed").is_some());
}

#[test]
fn events_serialize_with_type_tag() {
    let v = serde_json::to_value(GameEvent::effect(ItemKind::Edible)).unwrap();
    assert_eq!(v["type"], "effectOccurred");
    assert_eq!(v["kind"], "edible");
    assert_eq!(v["message"], ItemKind::Edible.message());

    let v = serde_json::to_value(GameEvent::SnakeDied).unwrap();
    assert_eq!(v["type"], "snakeDied");
}
