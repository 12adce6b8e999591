//! Writing through DataViewMut: `create_view`, `create_view_with`, `set`, `remove`.

use dataview::{DataContainer, DataMap, DataValue, query};

use crate::helpers::*;

// ===== CREATE VIEW =====

#[test]
fn test_create_view_rejects_empty_query() {
    let mut container = DataContainer::new();
    let err = container.root_mut().create_view("").unwrap_err();
    assert!(err.is_invalid_path());

    let err = container
        .root_mut()
        .create_view_with(query!(), DataMap::new())
        .unwrap_err();
    assert!(err.is_invalid_path());
}

#[test]
fn test_create_view_overwrites_existing_entry() {
    let mut container = setup_player_container();
    let old_stats = container.root().get_view("player.stats").unwrap().id();

    container.root_mut().create_view("player.stats").unwrap();

    let root = container.root();
    let new_stats = root.get_view("player.stats").unwrap();
    assert_ne!(new_stats.id(), old_stats);
    assert!(new_stats.is_empty());
    assert!(container.view(old_stats).unwrap().is_detached());
}

#[test]
fn test_map_with_empty_key_is_rejected_without_writing() {
    let mut container = DataContainer::new();
    container.root_mut().set("a", 5).unwrap();
    let views = container.view_count();

    let bad = DataValue::Map(data_map([("ok", 1), ("", 2)]));
    let err = container.root_mut().set("a", bad.clone()).unwrap_err();
    assert!(err.is_invalid_path());

    let root = container.root();
    assert_eq!(root.get_int("a"), Some(5));
    assert!(root.get_view("a").is_none());
    assert_eq!(container.view_count(), views);

    // Intermediate views are not materialized either
    assert!(container.root_mut().set("x.y", bad).is_err());
    assert!(!container.root().contains("x"));
}

#[test]
fn test_create_view_with_nested_empty_key_leaves_view_intact() {
    let mut container = setup_player_container();
    let player_id = container.root().get_view("player").unwrap().id();

    let mut nested = DataMap::new();
    nested.insert("level".to_string(), DataValue::Int(1));
    nested.insert("...".to_string(), DataValue::Int(2));
    let mut seed = DataMap::new();
    seed.insert("name".to_string(), "Alex".into());
    seed.insert("stats".to_string(), DataValue::Map(nested));

    let err = container
        .root_mut()
        .create_view_with("player", seed)
        .unwrap_err();
    assert!(err.is_invalid_path());
    assert_eq!(err.query(), Some("..."));

    let root = container.root();
    assert_eq!(root.get_view("player").map(|p| p.id()), Some(player_id));
    assert_eq!(root.get_view("player").unwrap().to_data_map(), player_map());
}

#[test]
fn test_create_view_with_round_trip() {
    let container = setup_player_container();
    let root = container.root();

    assert_eq!(root.get_string("player.name"), Some("Steve".to_string()));
    assert_eq!(root.get_double("player.health"), Some(18.5));
    assert_eq!(root.get_int("player.stats.kills"), Some(12));
    assert_eq!(root.get_int("player.stats.deaths"), Some(3));
    assert_eq!(
        root.get_string_list("player.tags"),
        Some(vec!["builder".to_string(), "miner".to_string()])
    );

    let stats = root.get_view("player.stats").expect("nested map becomes a view");
    assert_eq!(stats.parent().and_then(|p| p.name()), Some("player"));
    assert_eq!(root.get_view("player").unwrap().to_data_map(), player_map());
}

#[test]
fn test_create_view_with_splits_dotted_keys() {
    let mut container = DataContainer::new();
    container
        .root_mut()
        .create_view_with("settings", data_map([("video.fov", 90), ("volume", 7)]))
        .unwrap();

    let root = container.root();
    assert_eq!(root.get_int("settings.video.fov"), Some(90));
    assert!(root.get_view("settings.video").is_some());
    assert_eq!(root.get_int("settings.volume"), Some(7));
}

#[test]
fn test_create_view_returns_writable_child() {
    let mut container = DataContainer::new();
    {
        let mut root = container.root_mut();
        let mut world = root.create_view("world").unwrap();
        world.set("seed", 1234_i64).unwrap().set("name", "overworld").unwrap();
        world.create_view("spawn").unwrap().set("x", 10).unwrap();
    }

    let root = container.root();
    assert_eq!(root.get_long("world.seed"), Some(1234));
    assert_eq!(root.get_string("world.name"), Some("overworld".to_string()));
    assert_eq!(root.get_int("world.spawn.x"), Some(10));
}

// ===== SET =====

#[test]
fn test_set_creates_intermediate_views() {
    let mut container = DataContainer::new();
    container.root_mut().set("a.b.c", true).unwrap();

    let root = container.root();
    assert!(root.get_view("a").is_some());
    assert!(root.get_view("a.b").is_some());
    assert_eq!(root.get_bool("a.b.c"), Some(true));
}

#[test]
fn test_set_overwrites_values() {
    let mut container = DataContainer::new();
    let mut root = container.root_mut();
    root.set("level", 1).unwrap();
    root.set("level", "two").unwrap();

    assert_eq!(root.as_view().get_string("level"), Some("two".to_string()));
    assert_eq!(root.as_view().len(), 1);
}

#[test]
fn test_set_replaces_value_on_the_way() {
    let mut container = DataContainer::new();
    container.root_mut().set("a", 1).unwrap();
    container.root_mut().set("a.b", 2).unwrap();

    let root = container.root();
    assert!(root.get_view("a").is_some());
    assert_eq!(root.get_int("a.b"), Some(2));
}

#[test]
fn test_set_map_becomes_view() {
    let mut container = DataContainer::new();
    let position = data_map([("x", 1.5), ("y", -2.0)]);
    container
        .root_mut()
        .set("spawn", DataValue::Map(position))
        .unwrap();

    let root = container.root();
    let spawn = root.get_view("spawn").expect("maps are stored as views");
    assert_eq!(spawn.get_double("x"), Some(1.5));
    assert_eq!(spawn.current_path().to_string(), "spawn");
}

#[test]
fn test_set_rejects_empty_query() {
    let mut container = DataContainer::new();
    let err = container.root_mut().set(query!(), 1).unwrap_err();
    assert!(err.is_invalid_path());

    let err: dataview::Error = err.into();
    assert!(err.is_invalid_path());
    assert_eq!(err.module(), "view");
}

#[test]
fn test_set_over_view_detaches_it() {
    let mut container = setup_player_container();
    let player_id = container.root().get_view("player").unwrap().id();

    container.root_mut().set("player", 5).unwrap();
    assert_eq!(container.root().get_int("player"), Some(5));

    // The detached view keeps its own entries
    let player = container.view(player_id).unwrap();
    assert!(player.is_detached());
    assert_eq!(player.get_int("stats.kills"), Some(12));
    assert!(!container.root().contains("player.stats"));
}

// ===== REMOVE =====

#[test]
fn test_remove_entries() {
    let mut container = setup_player_container();
    let mut root = container.root_mut();

    assert!(root.remove("player.stats.kills").unwrap());
    assert!(!root.remove("player.stats.kills").unwrap());
    assert!(!root.remove("missing.deep.path").unwrap());
    assert!(!root.remove("player.name.inner").unwrap());

    let view = root.as_view();
    assert!(!view.contains("player.stats.kills"));
    assert_eq!(view.get_int("player.stats.deaths"), Some(3));
}

#[test]
fn test_remove_view_detaches_it() {
    let mut container = setup_player_container();
    let stats_id = container.root().get_view("player.stats").unwrap().id();

    assert!(container.root_mut().remove("player.stats").unwrap());

    assert!(container.root().get_view("player.stats").is_none());
    let stats = container.view(stats_id).unwrap();
    assert!(stats.is_detached());
    assert_eq!(stats.get_int("deaths"), Some(3));
}

#[test]
fn test_remove_keeps_order_of_remaining_entries() {
    let mut container = DataContainer::new();
    let mut root = container.root_mut();
    for key in ["a", "b", "c", "d"] {
        root.set(key, key).unwrap();
    }
    root.remove("b").unwrap();

    let keys: Vec<String> = root.as_view().keys(false).iter().map(|q| q.to_string()).collect();
    assert_eq!(keys, ["a", "c", "d"]);
}

#[test]
fn test_remove_rejects_empty_query() {
    let mut container = DataContainer::new();
    assert!(container.root_mut().remove("").unwrap_err().is_invalid_path());
}

// ===== HANDLES =====

#[test]
fn test_get_view_mut_writes_into_child() {
    let mut container = setup_player_container();
    container
        .root_mut()
        .get_view_mut("player.stats")
        .unwrap()
        .set("deaths", 4)
        .unwrap();

    assert_eq!(container.root().get_int("player.stats.deaths"), Some(4));
    assert!(container.root_mut().get_view_mut("player.name").is_none());
}

#[test]
fn test_into_view_keeps_borrow() {
    let mut container = DataContainer::new();
    let view = {
        let mut root = container.root_mut();
        root.set("a", 1).unwrap();
        root.into_view()
    };
    assert_eq!(view.get_int("a"), Some(1));
}
