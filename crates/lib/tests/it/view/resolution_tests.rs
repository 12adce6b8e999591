//! Query resolution: `get`, `get_view`, `contains` and the empty query.

use dataview::{DataContainer, DataQuery, DataValue, query};

use crate::helpers::*;

#[test]
fn test_create_view_then_get_returns_same_view() {
    for path in ["a", "a.b", "a.b.c", "x.y.z.w"] {
        let mut container = DataContainer::new();
        let created = container.root_mut().create_view(path).unwrap().id();

        let root = container.root();
        let resolved = root.get(path).and_then(|r| r.as_view()).unwrap();
        assert_eq!(resolved.id(), created, "path {path}");
        assert_eq!(root.get_view(path).map(|v| v.id()), Some(created));
        assert_eq!(resolved.current_path(), &DataQuery::from(path));
    }
}

#[test]
fn test_create_view_materializes_intermediates() {
    let mut container = DataContainer::new();
    container.root_mut().create_view(query!("a", "b")).unwrap();

    let root = container.root();
    let a = root.get_view(query!("a")).expect("intermediate view created");
    assert_eq!(a.name(), Some("a"));
    assert!(a.get_view("b").is_some());
    assert!(root.get(query!("a", "b", "c")).is_none());
    assert!(!root.contains("a.b.c"));
}

#[test]
fn test_empty_query_resolves_to_self() {
    let mut container = setup_player_container();
    {
        let mut root = container.root_mut();
        root.set("player.name", "Alex").unwrap();
        root.remove("player.tags").unwrap();
        root.create_view("world").unwrap();
    }

    let root = container.root();
    assert_eq!(root.get(DataQuery::new()).and_then(|r| r.as_view()), Some(root));

    let stats = root.get_view("player.stats").unwrap();
    assert_eq!(stats.get(query!()).and_then(|r| r.as_view()), Some(stats));
    assert_eq!(stats.get_view(""), Some(stats));
}

#[test]
fn test_queries_are_relative_to_the_view() {
    let container = setup_player_container();
    let root = container.root();
    let player = root.get_view("player").unwrap();

    assert_eq!(player.get_int("stats.kills"), Some(12));
    assert_eq!(root.get_int("player.stats.kills"), Some(12));
    assert_eq!(player.get_int("player.stats.kills"), None);
}

#[test]
fn test_long_paths_walk_every_part() {
    let mut container = DataContainer::new();
    container.root_mut().set("a.b.c.d.e", 5).unwrap();
    container.root_mut().set("a.x.c.d.e", 6).unwrap();

    let root = container.root();
    assert_eq!(root.get_int("a.b.c.d.e"), Some(5));
    assert_eq!(root.get_int("a.x.c.d.e"), Some(6));
    assert_eq!(root.get_view("a.b.c").unwrap().current_path().to_string(), "a.b.c");
}

#[test]
fn test_get_does_not_walk_through_values() {
    let mut container = DataContainer::new();
    container.root_mut().set("a", 1).unwrap();

    let root = container.root();
    assert!(root.get("a.b").is_none());
    assert!(root.get_view("a").is_none());
    assert_eq!(root.get_value("a"), Some(&DataValue::Int(1)));
}

#[test]
fn test_get_distinguishes_views_and_values() {
    let container = setup_player_container();
    let root = container.root();

    let stats = root.get("player.stats").unwrap();
    assert!(stats.is_view());
    assert!(stats.as_value().is_none());

    let name = root.get("player.name").unwrap();
    assert!(!name.is_view());
    assert_eq!(name.as_value().and_then(|v| v.as_str()), Some("Steve"));
}

#[test]
fn test_custom_separator_queries() {
    let container = setup_player_container();
    let root = container.root();
    assert_eq!(root.get_int(DataQuery::of('/', "player/stats/deaths")), Some(3));
}
