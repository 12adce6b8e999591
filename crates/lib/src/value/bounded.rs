//! Values constrained to an inclusive range.
//!
//! Every write to a [`BoundedValue`] is clamped into `[minimum, maximum]`,
//! so the element is always in range. A write that cannot be ordered against
//! the bounds, such as NaN, leaves the element unchanged.
//!
//! ```
//! use dataview::value::{BoundedValue, Mutable};
//!
//! let mut ticks = BoundedValue::<i32, Mutable>::new("fire_ticks", 0, 0, 100)?;
//! ticks.set(250);
//! assert_eq!(*ticks.get(), 100);
//! ticks.transform(|t| t - 500);
//! assert_eq!(*ticks.get(), 0);
//! # Ok::<(), dataview::Error>(())
//! ```

use std::{cmp::Ordering, fmt};

use super::{Flavor, Immutable, Key, Mutable, Value, ValueError};

#[derive(Debug, Clone)]
pub struct BoundedValue<E, F: Flavor> {
    value: Value<E, F>,
    minimum: E,
    maximum: E,
}

impl<E: PartialOrd + Clone + fmt::Debug, F: Flavor> BoundedValue<E, F> {
    /// Creates a bounded value holding its default element.
    ///
    /// # Errors
    /// Fails if `minimum > maximum` or `default` lies outside the range.
    pub fn new(
        key: impl Into<Key>,
        default: E,
        minimum: E,
        maximum: E,
    ) -> Result<Self, ValueError> {
        let key = key.into();
        let ordered = minimum <= maximum;
        if !ordered {
            return Err(ValueError::InvalidBounds {
                key: key.to_string(),
                reason: format!("minimum {minimum:?} is greater than maximum {maximum:?}"),
            });
        }
        let in_range = minimum <= default && default <= maximum;
        if !in_range {
            return Err(ValueError::InvalidBounds {
                key: key.to_string(),
                reason: format!("default {default:?} is outside [{minimum:?}, {maximum:?}]"),
            });
        }
        Ok(Self {
            value: Value::new(key, default),
            minimum,
            maximum,
        })
    }

    pub fn key(&self) -> &Key {
        self.value.key()
    }

    pub fn get(&self) -> &E {
        self.value.get()
    }

    pub fn default_value(&self) -> &E {
        self.value.default_value()
    }

    pub fn is_default(&self) -> bool {
        self.value.is_default()
    }

    pub fn minimum(&self) -> &E {
        &self.minimum
    }

    pub fn maximum(&self) -> &E {
        &self.maximum
    }

    /// Returns the unbounded value view of this bounded value.
    pub fn value(&self) -> &Value<E, F> {
        &self.value
    }

    /// Returns the same value and range in the counterpart flavor.
    pub fn flip(&self) -> BoundedValue<E, F::Counterpart> {
        BoundedValue {
            value: self.value.flip(),
            minimum: self.minimum.clone(),
            maximum: self.maximum.clone(),
        }
    }

    /// Brings `element` into range. An element that does not compare with
    /// both bounds (such as NaN) is dropped in favor of the current one.
    fn clamp(&self, element: E) -> E {
        let below = element.partial_cmp(&self.minimum);
        let above = element.partial_cmp(&self.maximum);
        match (below, above) {
            (Some(Ordering::Less), _) => {
                tracing::trace!(key = %self.key(), requested = ?element, minimum = ?self.minimum, "clamping to minimum");
                self.minimum.clone()
            }
            (_, Some(Ordering::Greater)) => {
                tracing::trace!(key = %self.key(), requested = ?element, maximum = ?self.maximum, "clamping to maximum");
                self.maximum.clone()
            }
            (Some(_), Some(_)) => element,
            _ => {
                tracing::trace!(key = %self.key(), requested = ?element, kept = ?self.get(), "ignoring element outside the ordering");
                self.get().clone()
            }
        }
    }
}

impl<E: PartialOrd + Clone + fmt::Debug> BoundedValue<E, Mutable> {
    /// Stores `element` clamped into range.
    pub fn set(&mut self, element: E) -> &mut Self {
        let element = self.clamp(element);
        self.value.set(element);
        self
    }

    pub fn transform(&mut self, f: impl FnOnce(&E) -> E) -> &mut Self {
        let next = f(self.get());
        self.set(next)
    }

    pub fn reset(&mut self) -> &mut Self {
        self.value.reset();
        self
    }

    pub fn to_immutable(&self) -> BoundedValue<E, Immutable> {
        self.flip()
    }
}

impl<E: PartialOrd + Clone + fmt::Debug> BoundedValue<E, Immutable> {
    /// Returns a bounded value holding `element` clamped into range.
    pub fn with(&self, element: E) -> Self {
        Self {
            value: self.value.with(self.clamp(element)),
            minimum: self.minimum.clone(),
            maximum: self.maximum.clone(),
        }
    }

    pub fn transform(&self, f: impl FnOnce(&E) -> E) -> Self {
        self.with(f(self.get()))
    }

    pub fn to_mutable(&self) -> BoundedValue<E, Mutable> {
        self.flip()
    }
}

impl<E: PartialEq, F: Flavor, G: Flavor> PartialEq<BoundedValue<E, G>> for BoundedValue<E, F> {
    fn eq(&self, other: &BoundedValue<E, G>) -> bool {
        self.value == other.value && self.minimum == other.minimum && self.maximum == other.maximum
    }
}
