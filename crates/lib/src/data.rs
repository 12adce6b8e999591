//! Values stored in the entries of a data view.
//!
//! [`DataValue`] is the closed set of shapes a view entry can hold: a scalar,
//! a list, or a map. Child views are not values; a map handed to a view is
//! materialized as a child view (see [`crate::view`]).
//!
//! Reading goes through [`FromData`], a best-effort coercion from whatever is
//! stored to the type the caller asks for. A failed coercion is a `None`,
//! never an error.
//!
//! ```
//! # use dataview::data::{DataValue, FromData};
//! let stored = DataValue::from("42");
//! assert_eq!(i32::from_data(&stored), Some(42));
//! assert_eq!(bool::from_data(&stored), None);
//!
//! let stored = DataValue::Long(7);
//! assert_eq!(f64::from_data(&stored), Some(7.0));
//! assert_eq!(String::from_data(&stored), Some("7".to_string()));
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered map of named values.
///
/// This is the nested-map shape accepted by
/// [`DataViewMut::create_view_with`](crate::view::DataViewMut::create_view_with)
/// and produced by [`DataView::to_data_map`](crate::view::DataView::to_data_map).
pub type DataMap = IndexMap<String, DataValue>;

/// Values that can be stored under a key of a data view.
///
/// ## Scalars
/// - [`DataValue::Bool`], [`DataValue::Char`], [`DataValue::String`]
/// - [`DataValue::Byte`], [`DataValue::Short`], [`DataValue::Int`], [`DataValue::Long`]
/// - [`DataValue::Float`], [`DataValue::Double`]
///
/// ## Containers
/// - [`DataValue::List`] - a sequence of scalars, of maps, or of lists
/// - [`DataValue::Map`] - a nested map; becomes a child view when stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    List(Vec<DataValue>),
    Map(DataMap),
}

impl DataValue {
    /// Returns true for every variant except `List` and `Map`.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, DataValue::List(_) | DataValue::Map(_))
    }

    /// Returns true if this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, DataValue::List(_))
    }

    /// Returns true if this is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, DataValue::Map(_))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Bool(_) => "bool",
            DataValue::Byte(_) => "byte",
            DataValue::Short(_) => "short",
            DataValue::Int(_) => "int",
            DataValue::Long(_) => "long",
            DataValue::Float(_) => "float",
            DataValue::Double(_) => "double",
            DataValue::Char(_) => "char",
            DataValue::String(_) => "string",
            DataValue::List(_) => "list",
            DataValue::Map(_) => "map",
        }
    }

    /// Attempts to borrow as a list
    pub fn as_list(&self) -> Option<&[DataValue]> {
        match self {
            DataValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to borrow as a map
    pub fn as_map(&self) -> Option<&DataMap> {
        match self {
            DataValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to borrow as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an `i64` if it is an integral number.
    fn integral(&self) -> Option<i64> {
        match self {
            DataValue::Byte(n) => Some(i64::from(*n)),
            DataValue::Short(n) => Some(i64::from(*n)),
            DataValue::Int(n) => Some(i64::from(*n)),
            DataValue::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as an `f64` if it is a floating point number.
    fn floating(&self) -> Option<f64> {
        match self {
            DataValue::Float(n) => Some(f64::from(*n)),
            DataValue::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Coerces into an `i64`, the common ground for every integral target.
    fn coerce_i64(&self) -> Option<i64> {
        if let Some(n) = self.integral() {
            return Some(n);
        }
        if let Some(f) = self.floating() {
            // `as` saturates, so check the range first
            let truncated = f.trunc();
            if f.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
                return Some(truncated as i64);
            }
            return None;
        }
        match self {
            DataValue::Bool(b) => Some(i64::from(*b)),
            DataValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn coerce_f64(&self) -> Option<f64> {
        if let Some(f) = self.floating() {
            return Some(f);
        }
        if let Some(n) = self.integral() {
            return Some(n as f64);
        }
        match self {
            DataValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            DataValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Bool(b) => write!(f, "{b}"),
            DataValue::Byte(n) => write!(f, "{n}"),
            DataValue::Short(n) => write!(f, "{n}"),
            DataValue::Int(n) => write!(f, "{n}"),
            DataValue::Long(n) => write!(f, "{n}"),
            DataValue::Float(n) => write!(f, "{n}"),
            DataValue::Double(n) => write!(f, "{n}"),
            DataValue::Char(c) => write!(f, "{c}"),
            DataValue::String(s) => write!(f, "{s}"),
            DataValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            DataValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Best-effort conversion from a stored [`DataValue`].
///
/// Implementations return `None` when the stored shape cannot represent the
/// target type. Lists and maps never coerce into scalars.
pub trait FromData: Sized {
    fn from_data(value: &DataValue) -> Option<Self>;
}

impl FromData for bool {
    fn from_data(value: &DataValue) -> Option<Self> {
        if let Some(n) = value.integral() {
            return Some(n != 0);
        }
        match value {
            DataValue::Bool(b) => Some(*b),
            DataValue::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            DataValue::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

macro_rules! impl_from_data_integral {
    ($($ty:ty),*) => {
        $(
            impl FromData for $ty {
                fn from_data(value: &DataValue) -> Option<Self> {
                    <$ty>::try_from(value.coerce_i64()?).ok()
                }
            }
        )*
    };
}

impl_from_data_integral!(i8, i16, i32, i64);

impl FromData for f64 {
    fn from_data(value: &DataValue) -> Option<Self> {
        value.coerce_f64()
    }
}

impl FromData for f32 {
    fn from_data(value: &DataValue) -> Option<Self> {
        match value {
            DataValue::Float(n) => Some(*n),
            other => other.coerce_f64().map(|n| n as f32),
        }
    }
}

impl FromData for char {
    fn from_data(value: &DataValue) -> Option<Self> {
        if let Some(n) = value.integral() {
            return u32::try_from(n).ok().and_then(char::from_u32);
        }
        match value {
            DataValue::Char(c) => Some(*c),
            DataValue::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl FromData for String {
    fn from_data(value: &DataValue) -> Option<Self> {
        if value.is_scalar() {
            Some(value.to_string())
        } else {
            None
        }
    }
}

impl FromData for DataValue {
    fn from_data(value: &DataValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromData for DataMap {
    fn from_data(value: &DataValue) -> Option<Self> {
        value.as_map().cloned()
    }
}

impl FromData for Vec<DataValue> {
    fn from_data(value: &DataValue) -> Option<Self> {
        value.as_list().map(<[DataValue]>::to_vec)
    }
}

// Convenient From implementations for common types
impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i8> for DataValue {
    fn from(value: i8) -> Self {
        DataValue::Byte(value)
    }
}

impl From<i16> for DataValue {
    fn from(value: i16) -> Self {
        DataValue::Short(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Int(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Long(value)
    }
}

impl From<f32> for DataValue {
    fn from(value: f32) -> Self {
        DataValue::Float(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Double(value)
    }
}

impl From<char> for DataValue {
    fn from(value: char) -> Self {
        DataValue::Char(value)
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<DataMap> for DataValue {
    fn from(value: DataMap) -> Self {
        DataValue::Map(value)
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(value: Vec<T>) -> Self {
        DataValue::List(value.into_iter().map(Into::into).collect())
    }
}

// PartialEq implementations for comparing DataValue with primitives
impl PartialEq<str> for DataValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for DataValue {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<bool> for DataValue {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, DataValue::Bool(b) if b == other)
    }
}

impl PartialEq<i32> for DataValue {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, DataValue::Int(n) if n == other)
    }
}

impl PartialEq<i64> for DataValue {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, DataValue::Long(n) if n == other)
    }
}
