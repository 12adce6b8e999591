//! Keyed values in a mutable and an immutable flavor.
//!
//! A [`Value`] carries one datum of element type `E` together with the
//! [`Key`] of the concept it represents and a default element. The flavor
//! parameter decides which operations are available:
//!
//! - [`Mutable`] values change in place and return `&mut Self` for chaining
//! - [`Immutable`] values never change; every operation returns a new value
//!
//! The two flavors convert into each other with [`Value::flip`] (or
//! [`Value::to_immutable`] / [`Value::to_mutable`]). The element lives behind
//! an [`Arc`], so conversions share it and a mutable value copies it on its
//! next write. An immutable snapshot therefore never observes later
//! mutations and can be sent to other threads whenever `E` can.
//!
//! ```
//! use dataview::value::{ImmutableValue, Key, MutableValue};
//!
//! const GRAVITY: Key = Key::from_static("gravity_enabled");
//!
//! let mut gravity = MutableValue::new(GRAVITY, true);
//! gravity.set(false);
//! let snapshot: ImmutableValue<bool> = gravity.to_immutable();
//! gravity.reset();
//!
//! assert!(*gravity.get());
//! assert!(!*snapshot.get());
//! assert_eq!(snapshot.with(true), gravity);
//! ```

use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

pub mod bounded;
pub mod errors;
pub mod map;
pub mod optional;

pub use bounded::BoundedValue;
pub use errors::ValueError;
pub use map::{ImmutableMapValue, MapValue, MutableMapValue};
pub use optional::{ImmutableOptionalValue, MutableOptionalValue, OptionalValue};

/// Identifies the domain concept a value represents, e.g. `"is_glowing"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Cow<'static, str>);

impl Key {
    /// Creates a key from a string literal, usable in constants.
    pub const fn from_static(id: &'static str) -> Self {
        Key(Cow::Borrowed(id))
    }

    /// Creates a key from an owned id.
    pub fn new(id: impl Into<String>) -> Self {
        Key(Cow::Owned(id.into()))
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Key {
    fn from(id: &'static str) -> Self {
        Key::from_static(id)
    }
}

impl From<String> for Key {
    fn from(id: String) -> Self {
        Key::new(id)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// The mutability flavor of a [`Value`].
///
/// Implemented only by [`Mutable`] and [`Immutable`], each naming the other
/// as its counterpart.
pub trait Flavor:
    sealed::Sealed + fmt::Debug + Clone + Copy + Default + Send + Sync + 'static
{
    /// The other flavor.
    type Counterpart: Flavor<Counterpart = Self>;

    /// Human readable flavor name.
    const NAME: &'static str;
}

/// Flavor of values that change in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Mutable;

/// Flavor of values that never change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Immutable;

impl sealed::Sealed for Mutable {}
impl sealed::Sealed for Immutable {}

impl Flavor for Mutable {
    type Counterpart = Immutable;
    const NAME: &'static str = "mutable";
}

impl Flavor for Immutable {
    type Counterpart = Mutable;
    const NAME: &'static str = "immutable";
}

/// A keyed datum with a default, in flavor `F`.
pub struct Value<E, F: Flavor> {
    key: Key,
    element: Arc<E>,
    default: Arc<E>,
    flavor: PhantomData<F>,
}

pub type MutableValue<E> = Value<E, Mutable>;
pub type ImmutableValue<E> = Value<E, Immutable>;

impl<E, F: Flavor> Value<E, F> {
    /// Creates a value holding its default element.
    pub fn new(key: impl Into<Key>, default: E) -> Self {
        let default = Arc::new(default);
        Self::from_arcs(key.into(), Arc::clone(&default), default)
    }

    /// Creates a value holding `element`, with `default` as its default element.
    pub fn with_default(key: impl Into<Key>, default: E, element: E) -> Self {
        Self::from_arcs(key.into(), Arc::new(element), Arc::new(default))
    }

    fn from_arcs(key: Key, element: Arc<E>, default: Arc<E>) -> Self {
        Value {
            key,
            element,
            default,
            flavor: PhantomData,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Returns the current element.
    pub fn get(&self) -> &E {
        &self.element
    }

    /// Returns the element this value holds when nothing was set.
    pub fn default_value(&self) -> &E {
        &self.default
    }

    /// Returns true if the current element equals the default element.
    pub fn is_default(&self) -> bool
    where
        E: PartialEq,
    {
        Arc::ptr_eq(&self.element, &self.default) || *self.element == *self.default
    }

    /// Returns the same key, element and default in the counterpart flavor.
    pub fn flip(&self) -> Value<E, F::Counterpart> {
        Value::from_arcs(
            self.key.clone(),
            Arc::clone(&self.element),
            Arc::clone(&self.default),
        )
    }

    /// Unshares the element for an in-place write.
    fn element_mut(&mut self) -> &mut E
    where
        E: Clone,
    {
        Arc::make_mut(&mut self.element)
    }
}

impl<E> Value<E, Mutable> {
    pub fn set(&mut self, element: E) -> &mut Self {
        self.element = Arc::new(element);
        self
    }

    /// Replaces the element with `f` applied to it.
    pub fn transform(&mut self, f: impl FnOnce(&E) -> E) -> &mut Self {
        let next = f(&self.element);
        self.set(next)
    }

    /// Goes back to the default element.
    pub fn reset(&mut self) -> &mut Self {
        self.element = Arc::clone(&self.default);
        self
    }

    /// Takes an immutable snapshot of this value.
    pub fn to_immutable(&self) -> Value<E, Immutable> {
        self.flip()
    }

    /// Returns an independent mutable copy.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl<E> Value<E, Immutable> {
    /// Returns a value with the same key and default holding `element`.
    pub fn with(&self, element: E) -> Self {
        Self::from_arcs(self.key.clone(), Arc::new(element), Arc::clone(&self.default))
    }

    /// Returns a value holding `f` applied to the current element.
    pub fn transform(&self, f: impl FnOnce(&E) -> E) -> Self {
        self.with(f(&self.element))
    }

    pub fn to_mutable(&self) -> Value<E, Mutable> {
        self.flip()
    }
}

impl<E, F: Flavor> Clone for Value<E, F> {
    fn clone(&self) -> Self {
        Self::from_arcs(
            self.key.clone(),
            Arc::clone(&self.element),
            Arc::clone(&self.default),
        )
    }
}

impl<E: fmt::Debug, F: Flavor> fmt::Debug for Value<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("flavor", &F::NAME)
            .field("key", &self.key)
            .field("element", &self.element)
            .field("default", &self.default)
            .finish()
    }
}

// Equality covers the key and the current element, whatever the flavors.
impl<E: PartialEq, F: Flavor, G: Flavor> PartialEq<Value<E, G>> for Value<E, F> {
    fn eq(&self, other: &Value<E, G>) -> bool {
        self.key == other.key && *self.element == *other.element
    }
}

impl<E: Eq, F: Flavor> Eq for Value<E, F> {}

impl<E: Hash, F: Flavor> Hash for Value<E, F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.element.hash(state);
    }
}
