//! Values whose element is an insertion-ordered map.
//!
//! Mutable map values edit their entries in place; immutable ones return a
//! new value from every edit and leave the receiver untouched. Predicate
//! filters keep the entries the predicate returns true for, in both flavors.
//!
//! ```
//! use dataview::value::{ImmutableMapValue, MutableMapValue};
//!
//! let mut scores = MutableMapValue::empty("scores");
//! scores.put("x", 1).put("y", 2).retain(|_, v| *v > 1);
//! assert!(!scores.contains_key("x"));
//!
//! let frozen: ImmutableMapValue<&str, i32> = scores.to_immutable();
//! let extended = frozen.with_entry("z", 3);
//! assert_eq!(frozen.len(), 1);
//! assert_eq!(extended.len(), 2);
//! ```

use std::hash::Hash;

use indexmap::{
    Equivalent, IndexMap,
    map::{Iter, Keys, Values},
};

use super::{Flavor, Immutable, Key, Mutable, Value};

pub type MapValue<K, V, F> = Value<IndexMap<K, V>, F>;
pub type MutableMapValue<K, V> = MapValue<K, V, Mutable>;
pub type ImmutableMapValue<K, V> = MapValue<K, V, Immutable>;

impl<K: Hash + Eq, V, F: Flavor> Value<IndexMap<K, V>, F> {
    /// Creates a map value whose default is the empty map.
    pub fn empty(key: impl Into<Key>) -> Self {
        Self::new(key, IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_empty()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.get().contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.get().values().any(|v| v == value)
    }

    /// Looks up the value stored under `key`.
    pub fn value_of<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.get().get(key)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.get().keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.get().values()
    }

    /// Iterates over the entries in insertion order.
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.get().iter()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Value<IndexMap<K, V>, Mutable> {
    /// Inserts or replaces the entry for `key`.
    pub fn put(&mut self, key: K, value: V) -> &mut Self {
        self.element_mut().insert(key, value);
        self
    }

    pub fn put_all(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> &mut Self {
        self.element_mut().extend(entries);
        self
    }

    /// Removes the entry for `key`, keeping the order of the others.
    pub fn remove<Q>(&mut self, key: &Q) -> &mut Self
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        if self.contains_key(key) {
            self.element_mut().shift_remove(key);
        }
        self
    }

    pub fn remove_all<'q, Q, I>(&mut self, keys: I) -> &mut Self
    where
        Q: ?Sized + Hash + Equivalent<K> + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        for key in keys {
            self.remove(key);
        }
        self
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &V) -> bool) -> &mut Self {
        self.element_mut().retain(|k, v| keep(k, v));
        self
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Value<IndexMap<K, V>, Immutable> {
    /// Returns a map value with the entry for `key` inserted or replaced.
    pub fn with_entry(&self, key: K, value: V) -> Self {
        let mut next = self.get().clone();
        next.insert(key, value);
        self.with(next)
    }

    pub fn with_all(&self, entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut next = self.get().clone();
        next.extend(entries);
        self.with(next)
    }

    /// Returns a map value without the entry for `key`.
    pub fn without<Q>(&self, key: &Q) -> Self
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.without_all([key])
    }

    pub fn without_all<'q, Q, I>(&self, keys: I) -> Self
    where
        Q: ?Sized + Hash + Equivalent<K> + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let mut next = self.get().clone();
        for key in keys {
            next.shift_remove(key);
        }
        self.with(next)
    }

    /// Returns a map value holding only the entries for which `keep` returns true.
    pub fn retaining(&self, mut keep: impl FnMut(&K, &V) -> bool) -> Self {
        let next = self
            .entries()
            .filter(|(k, v)| keep(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.with(next)
    }
}
