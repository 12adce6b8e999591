//! Queries for addressing values inside a data view tree.
//!
//! A [`DataQuery`] is an ordered list of parts. Each part names one level of
//! the tree, so `"player.stats.kills"` walks from the current view into the
//! `player` child, then `stats`, and finally addresses the `kills` entry.
//! The empty query addresses the view it is evaluated against.
//!
//! # Usage
//!
//! ```rust
//! use dataview::query::DataQuery;
//! use dataview::query;
//!
//! // Split on the default separator
//! let q = DataQuery::from("player.stats.kills");
//! assert_eq!(q.parts(), ["player", "stats", "kills"]);
//!
//! // Split on a custom separator
//! let q = DataQuery::of('/', "player/stats/kills");
//! assert_eq!(q.len(), 3);
//!
//! // Build incrementally (infallible)
//! let q = DataQuery::new().push("player").push("stats.kills");
//! assert_eq!(q.to_string(), "player.stats.kills");
//!
//! // Or with the macro
//! let q = query!("player", "stats", "kills");
//! assert_eq!(q, DataQuery::from("player.stats.kills"));
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_SEPARATOR, EMPTY_QUERY_DISPLAY};

/// Error type for query validation failures.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The operation needs a query with at least one part.
    #[error("Invalid query '{query}': {reason}")]
    InvalidPath { query: String, reason: String },
}

impl QueryError {
    /// Check if this error is an invalid path.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, QueryError::InvalidPath { .. })
    }

    /// Builds the error for an operation that needs at least one part.
    pub(crate) fn empty(operation: &str) -> Self {
        QueryError::InvalidPath {
            query: EMPTY_QUERY_DISPLAY.to_string(),
            reason: format!("{operation} needs a query with at least one part"),
        }
    }

    /// Get the offending query as displayed.
    pub fn query(&self) -> &str {
        match self {
            QueryError::InvalidPath { query, .. } => query,
        }
    }
}

// Conversion from QueryError to the main Error type
impl From<QueryError> for crate::Error {
    fn from(err: QueryError) -> Self {
        crate::Error::Query(err)
    }
}

/// Splits `input` on `separator`, dropping empty parts.
///
/// ```rust
/// # use dataview::query::split_parts;
/// assert_eq!(split_parts('.', "a..b."), vec!["a", "b"]);
/// assert!(split_parts('.', "...").is_empty());
/// ```
pub fn split_parts(separator: char, input: &str) -> Vec<String> {
    input
        .split(separator)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// An owned query into a data view tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataQuery {
    parts: Vec<String>,
}

impl DataQuery {
    /// Creates the empty query, which addresses the view itself.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Creates a query by splitting `query` on `separator`.
    ///
    /// Empty parts (leading, trailing or doubled separators) are dropped.
    pub fn of(separator: char, query: impl AsRef<str>) -> Self {
        Self {
            parts: split_parts(separator, query.as_ref()),
        }
    }

    /// Creates a query from parts that are already split.
    ///
    /// Parts are not split again, so a part may contain the separator.
    /// Empty parts cannot name an entry and are dropped.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts
                .into_iter()
                .map(Into::into)
                .filter(|part: &String| !part.is_empty())
                .collect(),
        }
    }

    /// Returns the parts of this query in order.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns the number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` for the empty (self) query.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the first part, or `None` if empty.
    pub fn first(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }

    /// Returns the last part, or `None` if empty.
    pub fn last(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    /// Returns a new query made of this query's parts followed by `other`'s.
    pub fn then(&self, other: impl AsRef<DataQuery>) -> DataQuery {
        let other = other.as_ref();
        let mut parts = Vec::with_capacity(self.parts.len() + other.parts.len());
        parts.extend(self.parts.iter().cloned());
        parts.extend(other.parts.iter().cloned());
        DataQuery { parts }
    }

    /// Appends `part` to the end of this query.
    ///
    /// The input is split on the default separator, so `push("a.b")` appends
    /// two parts and `push("")` appends nothing.
    pub fn push(mut self, part: impl AsRef<str>) -> Self {
        self.parts.extend(split_parts(DEFAULT_SEPARATOR, part.as_ref()));
        self
    }

    /// Returns the query without its last part, or `None` if empty.
    pub fn parent(&self) -> Option<DataQuery> {
        let (_, rest) = self.parts.split_last()?;
        Some(DataQuery {
            parts: rest.to_vec(),
        })
    }

    /// Splits off the first part, returning it and the remaining query.
    pub fn split_first(&self) -> Option<(&str, DataQuery)> {
        let (first, rest) = self.parts.split_first()?;
        Some((
            first.as_str(),
            DataQuery {
                parts: rest.to_vec(),
            },
        ))
    }

    /// Joins the parts with `separator`.
    pub fn join(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(part);
        }
        out
    }

    /// Fails with [`QueryError::InvalidPath`] if this query has no parts.
    ///
    /// `operation` names what was attempted and ends up in the error message.
    pub fn ensure_non_empty(&self, operation: &str) -> Result<(), QueryError> {
        if self.parts.is_empty() {
            return Err(QueryError::empty(operation));
        }
        Ok(())
    }
}

impl AsRef<DataQuery> for DataQuery {
    fn as_ref(&self) -> &DataQuery {
        self
    }
}

impl fmt::Display for DataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            write!(f, "{EMPTY_QUERY_DISPLAY}")
        } else {
            write!(f, "{}", self.join(DEFAULT_SEPARATOR))
        }
    }
}

impl FromStr for DataQuery {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::of(DEFAULT_SEPARATOR, s))
    }
}

impl From<&str> for DataQuery {
    fn from(query: &str) -> Self {
        Self::of(DEFAULT_SEPARATOR, query)
    }
}

impl From<String> for DataQuery {
    fn from(query: String) -> Self {
        Self::of(DEFAULT_SEPARATOR, query)
    }
}

impl From<&String> for DataQuery {
    fn from(query: &String) -> Self {
        Self::of(DEFAULT_SEPARATOR, query)
    }
}

impl From<&DataQuery> for DataQuery {
    fn from(query: &DataQuery) -> Self {
        query.clone()
    }
}

impl From<Vec<String>> for DataQuery {
    fn from(parts: Vec<String>) -> Self {
        Self::from_parts(parts)
    }
}

impl From<&[&str]> for DataQuery {
    fn from(parts: &[&str]) -> Self {
        Self::from_parts(parts.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for DataQuery {
    fn from(parts: [&str; N]) -> Self {
        Self::from_parts(parts)
    }
}

impl<'a> IntoIterator for &'a DataQuery {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Constructs a [`DataQuery`].
///
/// # Syntax
///
/// - `query!()` - Empty query
/// - `query!("player.stats.kills")` - Single literal, displayed then split on `.`
/// - `query!("player", "stats", "kills")` - Multiple components
/// - `query!(base, "stats", index)` - Mix runtime values (anything `Display`) and literals
///
/// # Examples
///
/// ```rust
/// # use dataview::query;
/// let a = query!("player.stats");
/// let name = "player";
/// let b = query!(name, "stats");
/// assert_eq!(a, b);
/// assert!(query!().is_empty());
/// ```
#[macro_export]
macro_rules! query {
    () => {
        $crate::query::DataQuery::new()
    };

    ($single:literal) => {
        $crate::query::DataQuery::of($crate::constants::DEFAULT_SEPARATOR, $single.to_string())
    };

    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let query = $crate::query::DataQuery::new().push($first.to_string());
        $(
            let query = query.push($rest.to_string());
        )*
        query
    }};
}
