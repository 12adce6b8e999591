//! Structural (de)serialization of domain types through data views.
//!
//! A type implements [`DataSerializable`] to write itself into a view and
//! [`DataBuilder`] to rebuild itself from one. The type itself is the token
//! that selects the builder in [`DataView::get_serializable`].
//!
//! ```
//! use dataview::view::{DataBuilder, DataContainer, DataSerializable, DataView, DataViewMut, ViewError};
//!
//! #[derive(Debug, PartialEq)]
//! struct Position {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl DataSerializable for Position {
//!     fn write_to(&self, view: &mut DataViewMut<'_>) -> Result<(), ViewError> {
//!         view.set("x", self.x)?.set("y", self.y)?;
//!         Ok(())
//!     }
//! }
//!
//! impl DataBuilder for Position {
//!     fn build(view: DataView<'_>) -> Option<Self> {
//!         Some(Position { x: view.get_double("x")?, y: view.get_double("y")? })
//!     }
//! }
//!
//! let mut container = DataContainer::new();
//! container.root_mut().set_serializable("spawn", &Position { x: 1.0, y: 2.5 })?;
//! assert_eq!(
//!     container.root().get_serializable::<Position>("spawn"),
//!     Some(Position { x: 1.0, y: 2.5 })
//! );
//! # Ok::<(), dataview::Error>(())
//! ```

use super::{DataContainer, DataView, DataViewMut, ViewError};

/// A type that can write itself into a data view.
pub trait DataSerializable {
    /// Writes the fields of `self` into `view`.
    fn write_to(&self, view: &mut DataViewMut<'_>) -> Result<(), ViewError>;

    /// Writes `self` into the root of a fresh container.
    fn to_container(&self) -> Result<DataContainer, ViewError> {
        let mut container = DataContainer::new();
        self.write_to(&mut container.root_mut())?;
        Ok(container)
    }
}

/// A type that can be rebuilt from a data view.
pub trait DataBuilder: Sized {
    /// Rebuilds a value from `view`, or `None` if the view does not hold one.
    fn build(view: DataView<'_>) -> Option<Self>;
}
