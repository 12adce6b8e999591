//!
//! dataview: hierarchical data views addressed by dotted queries, and keyed
//! values in mutable and immutable flavors.
//!
//! ## Core Concepts
//!
//! * **Queries (`query::DataQuery`)**: Ordered lists of key parts, such as `player.stats.kills`, that address an entry relative to a view.
//! * **Data values (`data::DataValue`)**: The closed set of things a view stores: scalars, strings, lists and maps, with best-effort coercion into requested types (`data::FromData`).
//! * **Containers (`view::DataContainer`)**: The owner of a tree of views. A container is a detached document that serializers read and write.
//! * **Views (`view::DataView`, `view::DataViewMut`)**: Borrowing handles on one node of the tree, used to resolve queries, read typed values, create child views and write entries.
//! * **Serializable types (`view::DataSerializable`, `view::DataBuilder`)**: Domain types that write themselves into a view and rebuild themselves from one.
//! * **Values (`value::Value`)**: A keyed datum with a default, either `Mutable` (changes in place) or `Immutable` (every change returns a new value). Maps, optionals and bounded numbers build on it.

pub mod constants;
pub mod data;
pub mod query;
pub mod value;
pub mod view;

/// Re-export the most used types for easier access.
pub use data::{DataMap, DataValue};
pub use query::DataQuery;
pub use value::{Immutable, Key, Mutable, Value};
pub use view::{DataContainer, DataView, DataViewMut};

/// Result type used throughout the dataview library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the dataview library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured query errors from the query module
    #[error(transparent)]
    Query(query::QueryError),

    /// Structured view errors from the view module
    #[error(transparent)]
    View(view::ViewError),

    /// Structured value errors from the value module
    #[error(transparent)]
    Value(value::ValueError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Query(_) => "query",
            Error::View(_) => "view",
            Error::Value(_) => "value",
        }
    }

    /// Check if this error was caused by an invalid (usually empty) query.
    pub fn is_invalid_path(&self) -> bool {
        match self {
            Error::Query(query_err) => query_err.is_invalid_path(),
            Error::View(view_err) => view_err.is_invalid_path(),
            _ => false,
        }
    }

    /// Check if this error indicates a view handle was used with the wrong container.
    pub fn is_illegal_state(&self) -> bool {
        match self {
            Error::View(view_err) => view_err.is_illegal_state(),
            _ => false,
        }
    }

    /// Check if this error indicates a bounded value was given an invalid range.
    pub fn is_invalid_bounds(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_invalid_bounds(),
            _ => false,
        }
    }

    /// Check if this error is view-related.
    pub fn is_view_error(&self) -> bool {
        matches!(self, Error::View(_))
    }

    /// Check if this error is value-related.
    pub fn is_value_error(&self) -> bool {
        matches!(self, Error::Value(_))
    }
}
