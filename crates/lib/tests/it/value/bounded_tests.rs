//! Bounded values: construction checks and clamping.

use dataview::value::{BoundedValue, Immutable, Mutable};

#[test]
fn test_invalid_bounds_are_rejected() {
    let err = BoundedValue::<i32, Mutable>::new("fire_ticks", 0, 10, 5).unwrap_err();
    assert!(err.is_invalid_bounds());
    assert_eq!(err.key(), "fire_ticks");

    let err = BoundedValue::<f64, Immutable>::new("speed", 2.0, 0.0, 1.0).unwrap_err();
    assert!(err.is_invalid_bounds());

    let err: dataview::Error = BoundedValue::<f64, Immutable>::new("speed", 0.5, 0.0, f64::NAN)
        .unwrap_err()
        .into();
    assert!(err.is_invalid_bounds());
    assert_eq!(err.module(), "value");
}

#[test]
fn test_single_point_range() {
    let mut fixed = BoundedValue::<i32, Mutable>::new("fixed", 3, 3, 3).unwrap();
    fixed.set(100);
    assert_eq!(*fixed.get(), 3);
    assert!(fixed.is_default());
}

#[test]
fn test_mutable_writes_are_clamped() {
    let mut ticks = BoundedValue::<i32, Mutable>::new("fire_ticks", 0, 0, 100).unwrap();
    assert_eq!(*ticks.minimum(), 0);
    assert_eq!(*ticks.maximum(), 100);

    ticks.set(250);
    assert_eq!(*ticks.get(), 100);
    ticks.set(-1);
    assert_eq!(*ticks.get(), 0);
    ticks.set(42).transform(|t| t + 1);
    assert_eq!(*ticks.get(), 43);

    ticks.reset();
    assert!(ticks.is_default());
}

#[test]
fn test_immutable_writes_are_clamped() {
    let speed = BoundedValue::<f64, Immutable>::new("walk_speed", 0.1, 0.0, 1.0).unwrap();
    let fast = speed.with(5.0);
    let slow = fast.transform(|s| s - 10.0);

    assert_eq!(*speed.get(), 0.1);
    assert_eq!(*fast.get(), 1.0);
    assert_eq!(*slow.get(), 0.0);
    assert_eq!(*slow.default_value(), 0.1);
}

#[test]
fn test_flavor_conversion_keeps_bounds() {
    let mut ticks = BoundedValue::<i32, Mutable>::new("air", 300, 0, 300).unwrap();
    ticks.set(150);
    let snapshot = ticks.to_immutable();
    ticks.set(0);

    assert_eq!(*snapshot.get(), 150);
    assert_eq!(*snapshot.maximum(), 300);
    assert_eq!(*snapshot.with(1000).get(), 300);

    let thawed = snapshot.to_mutable();
    assert_eq!(thawed, snapshot);
    assert_eq!(thawed.value().key().id(), "air");
}

#[test]
fn test_unordered_writes_keep_the_current_element() {
    let mut speed = BoundedValue::<f64, Mutable>::new("speed", 0.5, 0.0, 1.0).unwrap();
    speed.set(0.75);
    speed.set(f64::NAN);
    assert_eq!(*speed.get(), 0.75);

    speed.transform(|_| f64::NAN);
    assert_eq!(*speed.get(), 0.75);

    let frozen = speed.to_immutable().with(f64::NAN);
    assert_eq!(*frozen.get(), 0.75);
    assert!((0.0..=1.0).contains(frozen.get()));
}
