//! Values whose element may be absent.

use super::{Flavor, Immutable, Key, Mutable, Value};

pub type OptionalValue<T, F> = Value<Option<T>, F>;
pub type MutableOptionalValue<T> = OptionalValue<T, Mutable>;
pub type ImmutableOptionalValue<T> = OptionalValue<T, Immutable>;

impl<T, F: Flavor> Value<Option<T>, F> {
    /// Creates an optional value holding `element`; the default is absent.
    pub fn optional(key: impl Into<Key>, element: Option<T>) -> Self {
        Self::with_default(key, None, element)
    }

    /// Creates an absent optional value.
    pub fn absent(key: impl Into<Key>) -> Self {
        Self::new(key, None)
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    /// Returns a plain value with the same key holding the element, or
    /// `fallback` if absent. `fallback` is also the default of the result.
    ///
    /// ```
    /// use dataview::value::{ImmutableOptionalValue, ImmutableValue};
    ///
    /// let expiry = ImmutableOptionalValue::<u32>::absent("expiration_ticks");
    /// assert_eq!(expiry.or_else(40), ImmutableValue::new("expiration_ticks", 40));
    /// assert_eq!(*expiry.instead(Some(7)).or_else(40).get(), 7);
    /// ```
    pub fn or_else(&self, fallback: T) -> Value<T, F>
    where
        T: Clone,
    {
        let element = self.get().clone().unwrap_or_else(|| fallback.clone());
        Value::with_default(self.key().clone(), fallback, element)
    }
}

impl<T> Value<Option<T>, Mutable> {
    /// Sets or clears the element in place.
    pub fn set_to(&mut self, element: Option<T>) -> &mut Self {
        self.set(element)
    }
}

impl<T> Value<Option<T>, Immutable> {
    /// Returns a value holding `element`, which may be absent.
    pub fn instead(&self, element: Option<T>) -> Self {
        self.with(element)
    }
}
