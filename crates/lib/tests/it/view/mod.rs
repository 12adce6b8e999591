//! Data view integration tests
//!
//! This module tests DataContainer and its DataView / DataViewMut handles.
//! Tests are organized by concern for better maintainability.

mod mutation_tests;
mod resolution_tests;
