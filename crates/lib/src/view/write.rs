//! Write access to a view: creating child views, setting and removing values.

use super::{DataView, DataViewMut, ViewError, ViewId};
use crate::{
    data::{DataMap, DataValue},
    query::DataQuery,
    view::serializable::DataSerializable,
};

impl<'a> DataViewMut<'a> {
    /// Returns the id of this view, usable with [`super::DataContainer::view_mut`].
    pub fn id(&self) -> ViewId {
        self.container.view_id(self.index)
    }

    /// Borrows this handle as a read-only view.
    pub fn as_view(&self) -> DataView<'_> {
        DataView {
            container: &*self.container,
            index: self.index,
        }
    }

    /// Converts this handle into a read-only view for the rest of the borrow.
    pub fn into_view(self) -> DataView<'a> {
        DataView {
            container: self.container,
            index: self.index,
        }
    }

    /// Creates a new, empty child view at `query` and returns it.
    ///
    /// Missing intermediate views are created along the way, and an
    /// intermediate entry that holds a value is replaced by a view. Whatever
    /// was stored under the final part is overwritten; a view stored there
    /// becomes detached.
    ///
    /// # Errors
    /// Fails with an invalid path if `query` is empty.
    pub fn create_view(&mut self, query: impl Into<DataQuery>) -> Result<DataViewMut<'_>, ViewError> {
        let index = self.container.create_view_at(self.index, &query.into())?;
        Ok(DataViewMut {
            container: &mut *self.container,
            index,
        })
    }

    /// Creates a child view at `query` and fills it from `map`.
    ///
    /// Keys of `map` are split on the default separator. Nested maps become
    /// nested child views; every other value is [`set`](Self::set).
    ///
    /// # Errors
    /// Fails with an invalid path if `query` is empty or a key of `map`, at
    /// any depth, has no parts. The tree is left untouched in that case.
    ///
    /// ```
    /// # use dataview::view::DataContainer;
    /// # use dataview::data::{DataMap, DataValue};
    /// let mut inner = DataMap::new();
    /// inner.insert("level".to_string(), DataValue::Int(3));
    /// let mut seed = DataMap::new();
    /// seed.insert("name".to_string(), "Alex".into());
    /// seed.insert("stats".to_string(), DataValue::Map(inner));
    ///
    /// let mut container = DataContainer::new();
    /// container.root_mut().create_view_with("player", seed)?;
    ///
    /// let root = container.root();
    /// assert_eq!(root.get_string("player.name"), Some("Alex".to_string()));
    /// assert_eq!(root.get_int("player.stats.level"), Some(3));
    /// assert!(root.get_view("player.stats").is_some());
    /// # Ok::<(), dataview::Error>(())
    /// ```
    pub fn create_view_with(
        &mut self,
        query: impl Into<DataQuery>,
        map: DataMap,
    ) -> Result<DataViewMut<'_>, ViewError> {
        let index = self
            .container
            .create_view_with_at(self.index, &query.into(), map)?;
        Ok(DataViewMut {
            container: &mut *self.container,
            index,
        })
    }

    /// Opens the existing child view at `query` for writing.
    pub fn get_view_mut(&mut self, query: impl Into<DataQuery>) -> Option<DataViewMut<'_>> {
        let query = query.into();
        let index = self.container.find_view(self.index, query.parts())?;
        Some(DataViewMut {
            container: &mut *self.container,
            index,
        })
    }

    /// Stores `value` at `query`, overwriting what was there.
    ///
    /// Intermediate views are created like [`create_view`](Self::create_view)
    /// does. A [`DataValue::Map`] is stored as a child view.
    ///
    /// # Errors
    /// Fails with an invalid path if `query` is empty, or if `value` is a map
    /// with a key that has no parts. Nothing is written on failure.
    pub fn set(
        &mut self,
        query: impl Into<DataQuery>,
        value: impl Into<DataValue>,
    ) -> Result<&mut Self, ViewError> {
        self.container
            .set_at(self.index, &query.into(), value.into())?;
        Ok(self)
    }

    /// Removes the entry at `query`, returning whether anything was removed.
    ///
    /// Removing a child view detaches it. Nothing happens if `query` does not
    /// resolve.
    ///
    /// # Errors
    /// Fails with an invalid path if `query` is empty.
    pub fn remove(&mut self, query: impl Into<DataQuery>) -> Result<bool, ViewError> {
        self.container.remove_at(self.index, &query.into())
    }

    /// Writes `value` into a new child view at `query`.
    pub fn set_serializable<T: DataSerializable + ?Sized>(
        &mut self,
        query: impl Into<DataQuery>,
        value: &T,
    ) -> Result<&mut Self, ViewError> {
        {
            let mut view = self.create_view(query)?;
            value.write_to(&mut view)?;
        }
        Ok(self)
    }
}
