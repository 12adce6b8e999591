//! DataQuery integration tests
//!
//! Composition laws, separator handling and the conversions the view API
//! accepts in place of a query.

use std::collections::HashSet;

use dataview::{DataQuery, query};

#[test]
fn test_then_concatenates_parts() {
    let cases: [(&[&str], &[&str]); 4] = [
        (&[], &[]),
        (&["a"], &[]),
        (&[], &["b", "c"]),
        (&["a", "b"], &["c", "d", "e"]),
    ];

    for (left, right) in cases {
        let q1 = DataQuery::from(left);
        let q2 = DataQuery::from(right);
        let joined = q1.then(&q2);

        let expected: Vec<&str> = left.iter().chain(right.iter()).copied().collect();
        assert_eq!(joined.parts(), expected.as_slice());
        assert_eq!(joined.len(), q1.len() + q2.len());
    }
}

#[test]
fn test_custom_separator() {
    let q = DataQuery::of('/', "world/spawn/x");
    assert_eq!(q.parts(), ["world", "spawn", "x"]);
    assert_eq!(q.join('/'), "world/spawn/x");
    assert_eq!(q.to_string(), "world.spawn.x");

    // Dots are ordinary characters under another separator
    let q = DataQuery::of('/', "a.b/c");
    assert_eq!(q.parts(), ["a.b", "c"]);
}

#[test]
fn test_display_and_parse() {
    assert_eq!(DataQuery::new().to_string(), "(empty query)");

    let parsed: DataQuery = "player.stats".parse().unwrap();
    assert_eq!(parsed, query!("player", "stats"));
}

#[test]
fn test_structural_equality_and_hash() {
    let mut seen = HashSet::new();
    seen.insert(DataQuery::from("a.b"));
    seen.insert(DataQuery::from_parts(["a", "b"]));
    seen.insert(query!("a", "b"));
    seen.insert(DataQuery::new().push("a").push("b"));
    assert_eq!(seen.len(), 1);
}

#[test]
fn test_macro_with_runtime_values() {
    let slot = 3;
    let q = query!("inventory", slot, "count");
    assert_eq!(q.parts(), ["inventory", "3", "count"]);
    assert!(query!().is_empty());
}

#[test]
fn test_serde_round_trip() {
    let q = DataQuery::from("player.stats.kills");
    let json = serde_json::to_string(&q).unwrap();
    assert_eq!(json, r#"["player","stats","kills"]"#);

    let back: DataQuery = serde_json::from_str(&json).unwrap();
    assert_eq!(back, q);
}
