//! Read access to a view: query resolution, typed getters and traversal.

use indexmap::{IndexMap, IndexSet};

use super::{DataContainer, DataRef, DataView, ROOT, Slot, ViewId};
use crate::{
    data::{DataMap, DataValue, FromData},
    query::DataQuery,
    view::serializable::DataBuilder,
};

impl<'a> DataView<'a> {
    /// Returns the id of this view, usable with [`DataContainer::view`].
    pub fn id(&self) -> ViewId {
        self.container.view_id(self.index)
    }

    /// Returns the container that owns this view.
    pub fn container(&self) -> &'a DataContainer {
        self.container
    }

    /// Returns the absolute path of this view from the root.
    pub fn current_path(&self) -> &'a DataQuery {
        &self.node().path
    }

    /// Returns the key this view is stored under, or `None` for the root.
    pub fn name(&self) -> Option<&'a str> {
        self.node().path.last()
    }

    /// Returns the parent view, or `None` for the root.
    pub fn parent(&self) -> Option<DataView<'a>> {
        self.node().parent.map(|index| self.at(index))
    }

    /// Returns true for the root view of the container.
    pub fn is_root(&self) -> bool {
        self.index == ROOT
    }

    /// Returns true once this view was overwritten or removed from its own
    /// parent. Children of a detached view are not detached themselves; see
    /// [`is_reachable`](Self::is_reachable).
    pub fn is_detached(&self) -> bool {
        self.node().detached
    }

    /// Returns true if this view can be reached from the root, i.e. neither
    /// it nor any of its ancestors is detached.
    pub fn is_reachable(&self) -> bool {
        let mut view = *self;
        loop {
            if view.is_detached() {
                return false;
            }
            match view.parent() {
                Some(parent) => view = parent,
                None => return view.is_root(),
            }
        }
    }

    /// Returns the number of direct entries.
    pub fn len(&self) -> usize {
        self.node().entries.len()
    }

    /// Returns true if this view has no entries.
    pub fn is_empty(&self) -> bool {
        self.node().entries.is_empty()
    }

    /// Resolves `query` relative to this view.
    ///
    /// The empty query resolves to this view itself. Every part but the last
    /// must name a child view; the last part may name a view or a value.
    /// Anything that does not resolve is `None`.
    ///
    /// ```
    /// # use dataview::view::DataContainer;
    /// # use dataview::query::DataQuery;
    /// let mut container = DataContainer::new();
    /// container.root_mut().set("a.b", 1)?;
    ///
    /// let root = container.root();
    /// assert!(root.get("a").unwrap().is_view());
    /// assert_eq!(root.get("a.b").and_then(|r| r.as_value().cloned()), Some(1.into()));
    /// assert!(root.get("a.b.c").is_none());
    /// assert_eq!(root.get(DataQuery::new()).and_then(|r| r.as_view()), Some(root));
    /// # Ok::<(), dataview::Error>(())
    /// ```
    pub fn get(&self, query: impl Into<DataQuery>) -> Option<DataRef<'a>> {
        self.resolve(&query.into())
    }

    fn resolve(&self, query: &DataQuery) -> Option<DataRef<'a>> {
        let Some((last, intermediates)) = query.parts().split_last() else {
            return Some(DataRef::View(*self));
        };
        let node = self.container.find_view(self.index, intermediates)?;
        let slot = self.container.node(node).entries.get(last.as_str())?;
        Some(self.slot_ref(slot))
    }

    fn slot_ref(&self, slot: &'a Slot) -> DataRef<'a> {
        match slot {
            Slot::Data(value) => DataRef::Value(value),
            Slot::View(child) => DataRef::View(self.at(*child)),
        }
    }

    /// Returns true if `query` resolves to a view or a value.
    pub fn contains(&self, query: impl Into<DataQuery>) -> bool {
        self.get(query).is_some()
    }

    /// Resolves `query` to a stored value; child views are `None`.
    pub fn get_value(&self, query: impl Into<DataQuery>) -> Option<&'a DataValue> {
        self.get(query)?.as_value()
    }

    /// Resolves `query` to a child view.
    pub fn get_view(&self, query: impl Into<DataQuery>) -> Option<DataView<'a>> {
        self.get(query)?.as_view()
    }

    /// Gets a value with best-effort coercion into `T`.
    ///
    /// Returns `None` when nothing is stored at `query` or the stored value
    /// cannot be coerced.
    pub fn get_as<T: FromData>(&self, query: impl Into<DataQuery>) -> Option<T> {
        self.get_value(query).and_then(T::from_data)
    }

    pub fn get_bool(&self, query: impl Into<DataQuery>) -> Option<bool> {
        self.get_as(query)
    }

    pub fn get_byte(&self, query: impl Into<DataQuery>) -> Option<i8> {
        self.get_as(query)
    }

    pub fn get_short(&self, query: impl Into<DataQuery>) -> Option<i16> {
        self.get_as(query)
    }

    pub fn get_int(&self, query: impl Into<DataQuery>) -> Option<i32> {
        self.get_as(query)
    }

    pub fn get_long(&self, query: impl Into<DataQuery>) -> Option<i64> {
        self.get_as(query)
    }

    pub fn get_float(&self, query: impl Into<DataQuery>) -> Option<f32> {
        self.get_as(query)
    }

    pub fn get_double(&self, query: impl Into<DataQuery>) -> Option<f64> {
        self.get_as(query)
    }

    pub fn get_char(&self, query: impl Into<DataQuery>) -> Option<char> {
        self.get_as(query)
    }

    pub fn get_string(&self, query: impl Into<DataQuery>) -> Option<String> {
        self.get_as(query)
    }

    /// Returns a copy of the list stored at `query`.
    ///
    /// Only succeeds if the stored value is a list.
    pub fn get_list(&self, query: impl Into<DataQuery>) -> Option<Vec<DataValue>> {
        self.get_value(query)?.as_list().map(<[DataValue]>::to_vec)
    }

    /// Returns the list stored at `query` with every element coerced into `T`.
    ///
    /// Elements that do not coerce are left out rather than failing the
    /// whole list.
    ///
    /// ```
    /// # use dataview::view::DataContainer;
    /// # use dataview::data::DataValue;
    /// let mut container = DataContainer::new();
    /// container.root_mut().set("mixed", vec![
    ///     DataValue::Int(1),
    ///     DataValue::from("two"),
    ///     DataValue::from("3"),
    /// ])?;
    /// assert_eq!(container.root().get_int_list("mixed"), Some(vec![1, 3]));
    /// # Ok::<(), dataview::Error>(())
    /// ```
    pub fn get_list_as<T: FromData>(&self, query: impl Into<DataQuery>) -> Option<Vec<T>> {
        let query = query.into();
        let items = self.get_value(&query)?.as_list()?;
        let coerced = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let converted = T::from_data(item);
                if converted.is_none() {
                    tracing::trace!(
                        query = %query,
                        index,
                        stored = item.type_name(),
                        target = std::any::type_name::<T>(),
                        "dropping list element that does not coerce"
                    );
                }
                converted
            })
            .collect();
        Some(coerced)
    }

    pub fn get_bool_list(&self, query: impl Into<DataQuery>) -> Option<Vec<bool>> {
        self.get_list_as(query)
    }

    pub fn get_byte_list(&self, query: impl Into<DataQuery>) -> Option<Vec<i8>> {
        self.get_list_as(query)
    }

    pub fn get_short_list(&self, query: impl Into<DataQuery>) -> Option<Vec<i16>> {
        self.get_list_as(query)
    }

    pub fn get_int_list(&self, query: impl Into<DataQuery>) -> Option<Vec<i32>> {
        self.get_list_as(query)
    }

    pub fn get_long_list(&self, query: impl Into<DataQuery>) -> Option<Vec<i64>> {
        self.get_list_as(query)
    }

    pub fn get_float_list(&self, query: impl Into<DataQuery>) -> Option<Vec<f32>> {
        self.get_list_as(query)
    }

    pub fn get_double_list(&self, query: impl Into<DataQuery>) -> Option<Vec<f64>> {
        self.get_list_as(query)
    }

    pub fn get_char_list(&self, query: impl Into<DataQuery>) -> Option<Vec<char>> {
        self.get_list_as(query)
    }

    pub fn get_string_list(&self, query: impl Into<DataQuery>) -> Option<Vec<String>> {
        self.get_list_as(query)
    }

    /// Returns the maps of the list stored at `query`; other elements are left out.
    pub fn get_map_list(&self, query: impl Into<DataQuery>) -> Option<Vec<DataMap>> {
        self.get_list_as(query)
    }

    /// Rebuilds a `T` from the child view at `query`.
    ///
    /// Returns `None` if there is no view at `query` or the builder rejects it.
    pub fn get_serializable<T: DataBuilder>(&self, query: impl Into<DataQuery>) -> Option<T> {
        T::build(self.get_view(query)?)
    }

    /// Returns the queries of all entries, relative to this view.
    ///
    /// With `deep`, child views contribute their own key followed by all of
    /// their keys. Insertion order is preserved.
    pub fn keys(&self, deep: bool) -> IndexSet<DataQuery> {
        self.values(deep).into_keys().collect()
    }

    /// Returns all entries keyed by their query relative to this view.
    ///
    /// The key set is the same as [`DataView::keys`] for the same `deep`.
    pub fn values(&self, deep: bool) -> IndexMap<DataQuery, DataRef<'a>> {
        let mut out = IndexMap::new();
        self.collect_values(&DataQuery::new(), deep, &mut out);
        out
    }

    fn collect_values(
        &self,
        prefix: &DataQuery,
        deep: bool,
        out: &mut IndexMap<DataQuery, DataRef<'a>>,
    ) {
        for (key, slot) in &self.node().entries {
            let query = prefix.then(DataQuery::from_parts([key.as_str()]));
            let entry = self.slot_ref(slot);
            match entry {
                DataRef::View(child) if deep => {
                    out.insert(query.clone(), entry);
                    child.collect_values(&query, deep, out);
                }
                _ => {
                    out.insert(query, entry);
                }
            }
        }
    }

    /// Returns a deep snapshot of this view; child views become nested maps.
    pub fn to_data_map(&self) -> DataMap {
        self.node()
            .entries
            .iter()
            .map(|(key, slot)| {
                let value = match slot {
                    Slot::Data(value) => value.clone(),
                    Slot::View(child) => DataValue::Map(self.at(*child).to_data_map()),
                };
                (key.clone(), value)
            })
            .collect()
    }

    /// Deep-copies this view into a new container, whose root holds this view's entries.
    pub fn copy(&self) -> DataContainer {
        let mut container = DataContainer::new();
        container.copy_from(ROOT, *self);
        container
    }
}
