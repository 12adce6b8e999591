//! Constants used throughout the dataview library.
//!
//! This module provides central definitions for the query syntax shared by
//! the query parser, the view tree and any external (de)serializer.

/// Separator used to split textual queries into parts when none is given.
pub const DEFAULT_SEPARATOR: char = '.';

/// How the empty (self) query renders with `Display`.
pub const EMPTY_QUERY_DISPLAY: &str = "(empty query)";
