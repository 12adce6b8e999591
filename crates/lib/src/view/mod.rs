//! Hierarchical data views.
//!
//! A [`DataContainer`] owns a tree of views. Every view maps single-part keys
//! to either a [`DataValue`] or a child view, and is addressed from any other
//! view with a [`DataQuery`].
//!
//! # Design
//!
//! Views live in an arena owned by the container and refer to each other by
//! index, so the tree holds no reference cycles: ownership flows strictly
//! from a parent's entry to its child, and the parent link is only used for
//! navigation. Access goes through two borrowing handles:
//!
//! - [`DataView`] - shared, `Copy`, read-only
//! - [`DataViewMut`] - exclusive, creates views and writes values
//!
//! A view that is overwritten or removed from its parent is *detached*: it
//! is no longer reachable from the root but can still be opened by its
//! [`ViewId`], and its own children stay intact. [`DataContainer::compact`]
//! releases every unreachable view; their slots are reused by later views
//! and their ids stop opening anything.
//!
//! # Usage
//!
//! ```
//! use dataview::view::DataContainer;
//!
//! let mut container = DataContainer::new();
//! let mut root = container.root_mut();
//! root.set("player.name", "Steve")?;
//! root.set("player.stats.kills", 12)?;
//!
//! let root = container.root();
//! assert_eq!(root.get_string("player.name"), Some("Steve".to_string()));
//! assert_eq!(root.get_long("player.stats.kills"), Some(12));
//!
//! let stats = root.get_view("player.stats").unwrap();
//! assert_eq!(stats.current_path().to_string(), "player.stats");
//! assert_eq!(stats.parent().and_then(|p| p.name()), Some("player"));
//! # Ok::<(), dataview::Error>(())
//! ```

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;

use crate::{
    constants::DEFAULT_SEPARATOR,
    data::{DataMap, DataValue},
    query::{DataQuery, QueryError},
};

pub mod errors;
mod read;
pub mod serializable;
mod write;

pub use errors::ViewError;
pub use serializable::{DataBuilder, DataSerializable};

/// Index of the root view in every container's arena.
const ROOT: usize = 0;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a view inside a [`DataContainer`].
///
/// Ids stay valid until the view is released by
/// [`DataContainer::compact`], including while it is detached. An id is only
/// meaningful to the container that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId {
    container: u64,
    index: usize,
    generation: u32,
}

impl ViewId {
    /// Returns true if this id names the root view of its container.
    pub fn is_root(&self) -> bool {
        self.index == ROOT
    }
}

/// What a view stores under a single key.
#[derive(Debug, Clone)]
enum Slot {
    Data(DataValue),
    View(usize),
}

/// One node of the arena.
#[derive(Debug, Clone)]
struct ViewNode {
    parent: Option<usize>,
    path: DataQuery,
    entries: IndexMap<String, Slot>,
    detached: bool,
    /// Bumped every time the slot is released.
    generation: u32,
}

impl ViewNode {
    fn root() -> Self {
        Self {
            parent: None,
            path: DataQuery::new(),
            entries: IndexMap::new(),
            detached: false,
            generation: 0,
        }
    }
}

/// A resolved entry of a view: either a child view or a stored value.
#[derive(Debug, Clone, Copy)]
pub enum DataRef<'a> {
    View(DataView<'a>),
    Value(&'a DataValue),
}

impl<'a> DataRef<'a> {
    /// Returns true if this entry is a child view
    pub fn is_view(&self) -> bool {
        matches!(self, DataRef::View(_))
    }

    /// Attempts to get the child view
    pub fn as_view(&self) -> Option<DataView<'a>> {
        match self {
            DataRef::View(view) => Some(*view),
            DataRef::Value(_) => None,
        }
    }

    /// Attempts to get the stored value
    pub fn as_value(&self) -> Option<&'a DataValue> {
        match self {
            DataRef::Value(value) => Some(*value),
            DataRef::View(_) => None,
        }
    }

    /// Converts into an owned value; child views become [`DataValue::Map`] snapshots.
    pub fn to_data_value(&self) -> DataValue {
        match self {
            DataRef::View(view) => DataValue::Map(view.to_data_map()),
            DataRef::Value(value) => (*value).clone(),
        }
    }
}

/// The root of a data view tree and the owner of all of its views.
///
/// Containers are detached documents: they are created empty (or from a
/// [`DataMap`]) and filled through [`DataContainer::root_mut`].
pub struct DataContainer {
    id: u64,
    nodes: Vec<ViewNode>,
    /// Released slots, reused before the arena grows.
    free: Vec<usize>,
}

impl DataContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
            nodes: vec![ViewNode::root()],
            free: Vec::new(),
        }
    }

    /// Creates a container whose root is populated from `map`.
    ///
    /// Keys are split on the default separator and nested maps become child
    /// views, exactly as [`DataViewMut::create_view_with`] does.
    pub fn from_map(map: DataMap) -> Result<Self, ViewError> {
        check_seed(&map, "from_map")?;
        let mut container = Self::new();
        container.populate(ROOT, map)?;
        Ok(container)
    }

    /// Returns a read handle on the root view.
    pub fn root(&self) -> DataView<'_> {
        DataView {
            container: self,
            index: ROOT,
        }
    }

    /// Returns a write handle on the root view.
    pub fn root_mut(&mut self) -> DataViewMut<'_> {
        DataViewMut {
            container: self,
            index: ROOT,
        }
    }

    /// Opens the view with the given id, if it belongs to this container.
    pub fn view(&self, id: ViewId) -> Option<DataView<'_>> {
        self.owns(id).then_some(DataView {
            container: self,
            index: id.index,
        })
    }

    /// Opens the view with the given id for writing, if it belongs to this container.
    pub fn view_mut(&mut self, id: ViewId) -> Option<DataViewMut<'_>> {
        if self.owns(id) {
            Some(DataViewMut {
                container: self,
                index: id.index,
            })
        } else {
            None
        }
    }

    /// Like [`DataContainer::view`], but a foreign or released id is an
    /// [`ViewError::IllegalState`].
    pub fn try_view(&self, id: ViewId) -> Result<DataView<'_>, ViewError> {
        if !self.owns(id) {
            return Err(self.foreign_id_error(id));
        }
        Ok(DataView {
            container: self,
            index: id.index,
        })
    }

    /// Like [`DataContainer::view_mut`], but a foreign or released id is an
    /// [`ViewError::IllegalState`].
    pub fn try_view_mut(&mut self, id: ViewId) -> Result<DataViewMut<'_>, ViewError> {
        if !self.owns(id) {
            return Err(self.foreign_id_error(id));
        }
        Ok(DataViewMut {
            container: self,
            index: id.index,
        })
    }

    /// Returns the number of views held, detached ones included until the
    /// next [`compact`](Self::compact).
    pub fn view_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Releases every view that is no longer reachable from the root.
    ///
    /// Ids of released views stop opening anything, and their slots are
    /// reused by views created later. Ids of reachable views are unchanged.
    /// Returns the number of views released.
    ///
    /// ```
    /// # use dataview::view::DataContainer;
    /// let mut container = DataContainer::new();
    /// let old = container.root_mut().create_view("spawn")?.id();
    /// container.root_mut().set("spawn", 1)?;
    /// assert!(container.view(old).is_some_and(|v| v.is_detached()));
    ///
    /// assert_eq!(container.compact(), 1);
    /// assert!(container.view(old).is_none());
    /// assert_eq!(container.view_count(), 1);
    /// # Ok::<(), dataview::Error>(())
    /// ```
    pub fn compact(&mut self) -> usize {
        let mut keep = vec![false; self.nodes.len()];
        let mut pending = vec![ROOT];
        while let Some(index) = pending.pop() {
            keep[index] = true;
            pending.extend(self.node(index).entries.values().filter_map(|slot| match slot {
                Slot::View(child) => Some(*child),
                Slot::Data(_) => None,
            }));
        }

        for &index in &self.free {
            keep[index] = true;
        }

        let mut released = 0;
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if keep[index] {
                continue;
            }
            node.parent = None;
            node.entries.clear();
            node.detached = true;
            node.generation = node.generation.wrapping_add(1);
            self.free.push(index);
            released += 1;
        }
        if released > 0 {
            tracing::debug!(released, remaining = self.view_count(), "compacted container");
        }
        released
    }

    fn owns(&self, id: ViewId) -> bool {
        id.container == self.id
            && self
                .nodes
                .get(id.index)
                .is_some_and(|node| node.generation == id.generation)
    }

    fn foreign_id_error(&self, id: ViewId) -> ViewError {
        let reason = if id.container == self.id {
            format!("view {} of container {} was released", id.index, self.id)
        } else {
            format!(
                "view {} of container {} used with container {}",
                id.index, id.container, self.id
            )
        };
        ViewError::IllegalState { reason }
    }

    fn view_id(&self, index: usize) -> ViewId {
        ViewId {
            container: self.id,
            index,
            generation: self.node(index).generation,
        }
    }

    fn node(&self, index: usize) -> &ViewNode {
        &self.nodes[index]
    }

    fn node_mut(&mut self, index: usize) -> &mut ViewNode {
        &mut self.nodes[index]
    }

    /// Allocates a child of `parent` named `name` without linking it.
    ///
    /// Released slots are reused first.
    fn alloc_child(&mut self, parent: usize, name: &str) -> usize {
        let path = self.node(parent).path.then(DataQuery::from_parts([name]));
        tracing::trace!(path = %path, "materializing view");
        if let Some(index) = self.free.pop() {
            let node = self.node_mut(index);
            node.parent = Some(parent);
            node.path = path;
            node.detached = false;
            return index;
        }
        self.nodes.push(ViewNode {
            parent: Some(parent),
            path,
            entries: IndexMap::new(),
            detached: false,
            generation: 0,
        });
        self.nodes.len() - 1
    }

    /// Stores `slot` under `key`, detaching any view it replaces.
    fn insert_slot(&mut self, node: usize, key: &str, slot: Slot) {
        let previous = self.node_mut(node).entries.insert(key.to_string(), slot);
        if let Some(Slot::View(old)) = previous {
            self.detach(old);
        }
    }

    fn detach(&mut self, index: usize) {
        let node = self.node_mut(index);
        node.detached = true;
        tracing::debug!(path = %node.path, "view detached from its parent");
    }

    /// Returns the child view under `part`, replacing whatever else is there.
    fn ensure_child_view(&mut self, node: usize, part: &str) -> usize {
        if let Some(Slot::View(child)) = self.node(node).entries.get(part) {
            return *child;
        }
        self.attach_child(node, part)
    }

    /// Walks `parts` from `start`, materializing every missing view.
    fn ensure_views(&mut self, start: usize, parts: &[String]) -> usize {
        parts
            .iter()
            .fold(start, |node, part| self.ensure_child_view(node, part))
    }

    /// Walks `parts` from `start` without creating anything.
    fn find_view(&self, start: usize, parts: &[String]) -> Option<usize> {
        let mut node = start;
        for part in parts {
            match self.node(node).entries.get(part)? {
                Slot::View(child) => node = *child,
                Slot::Data(_) => return None,
            }
        }
        Some(node)
    }

    /// Allocates a child of `parent` named `name` and links it, replacing the old entry.
    fn attach_child(&mut self, parent: usize, name: &str) -> usize {
        let child = self.alloc_child(parent, name);
        self.insert_slot(parent, name, Slot::View(child));
        child
    }

    fn create_view_at(&mut self, start: usize, query: &DataQuery) -> Result<usize, ViewError> {
        let (last, intermediates) = split_last(query, "create_view")?;
        let parent = self.ensure_views(start, intermediates);
        Ok(self.attach_child(parent, last))
    }

    /// Creates a child view at `query` filled from `map`.
    ///
    /// The whole of `map` is checked before the tree is touched.
    fn create_view_with_at(
        &mut self,
        start: usize,
        query: &DataQuery,
        map: DataMap,
    ) -> Result<usize, ViewError> {
        check_seed(&map, "create_view_with")?;
        let child = self.create_view_at(start, query)?;
        self.populate(child, map)?;
        Ok(child)
    }

    fn set_at(&mut self, start: usize, query: &DataQuery, value: DataValue) -> Result<(), ViewError> {
        let (last, intermediates) = split_last(query, "set")?;
        if let DataValue::Map(map) = &value {
            check_seed(map, "set")?;
        }
        let parent = self.ensure_views(start, intermediates);
        match value {
            DataValue::Map(map) => {
                let child = self.attach_child(parent, last);
                self.populate(child, map)
            }
            other => {
                self.insert_slot(parent, last, Slot::Data(other));
                Ok(())
            }
        }
    }

    fn remove_at(&mut self, start: usize, query: &DataQuery) -> Result<bool, ViewError> {
        let (last, intermediates) = split_last(query, "remove")?;
        let Some(parent) = self.find_view(start, intermediates) else {
            return Ok(false);
        };
        match self.node_mut(parent).entries.shift_remove(last) {
            Some(Slot::View(child)) => {
                self.detach(child);
                Ok(true)
            }
            Some(Slot::Data(_)) => Ok(true),
            None => Ok(false),
        }
    }

    /// Writes every entry of `map` into the view at `node`.
    fn populate(&mut self, node: usize, map: DataMap) -> Result<(), ViewError> {
        for (key, value) in map {
            let query = DataQuery::of(DEFAULT_SEPARATOR, &key);
            match value {
                DataValue::Map(nested) => {
                    let child = self.create_view_at(node, &query)?;
                    self.populate(child, nested)?;
                }
                other => self.set_at(node, &query, other)?,
            }
        }
        Ok(())
    }

    /// Deep-copies the entries of `source` (a view of another container) into `node`.
    fn copy_from(&mut self, node: usize, source: DataView<'_>) {
        for (key, slot) in &source.node().entries {
            match slot {
                Slot::Data(value) => self.insert_slot(node, key, Slot::Data(value.clone())),
                Slot::View(child) => {
                    let copy = self.attach_child(node, key);
                    self.copy_from(copy, source.at(*child));
                }
            }
        }
    }
}

/// Splits a query into its last part and the parts before it.
///
/// An empty query cannot address an entry, so it fails with an invalid path
/// naming `operation`.
fn split_last<'q>(
    query: &'q DataQuery,
    operation: &str,
) -> Result<(&'q str, &'q [String]), QueryError> {
    query
        .parts()
        .split_last()
        .map(|(last, intermediates)| (last.as_str(), intermediates))
        .ok_or_else(|| QueryError::empty(operation))
}

/// Fails if any key of `map`, at any depth, splits into an empty query.
fn check_seed(map: &DataMap, operation: &str) -> Result<(), QueryError> {
    for (key, value) in map {
        DataQuery::of(DEFAULT_SEPARATOR, key)
            .ensure_non_empty(operation)
            .map_err(|_| QueryError::InvalidPath {
                query: key.clone(),
                reason: format!("{operation} got a map key with no parts"),
            })?;
        if let DataValue::Map(nested) = value {
            check_seed(nested, operation)?;
        }
    }
    Ok(())
}

impl Default for DataContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DataContainer {
    /// Clones the reachable tree into a fresh container; detached views are dropped.
    fn clone(&self) -> Self {
        self.root().copy()
    }
}

impl PartialEq for DataContainer {
    fn eq(&self, other: &Self) -> bool {
        self.root().to_data_map() == other.root().to_data_map()
    }
}

impl fmt::Debug for DataContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataContainer")
            .field("id", &self.id)
            .field("views", &self.view_count())
            .field("data", &self.root().to_data_map())
            .finish()
    }
}

/// A shared, read-only handle on one view of a [`DataContainer`].
///
/// Two handles compare equal when they point at the same view of the same
/// container.
#[derive(Clone, Copy)]
pub struct DataView<'a> {
    container: &'a DataContainer,
    index: usize,
}

impl<'a> DataView<'a> {
    fn node(&self) -> &'a ViewNode {
        self.container.node(self.index)
    }

    /// Returns a handle on another view of the same container.
    fn at(&self, index: usize) -> DataView<'a> {
        DataView {
            container: self.container,
            index,
        }
    }
}

impl PartialEq for DataView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.container, other.container) && self.index == other.index
    }
}

impl Eq for DataView<'_> {}

impl fmt::Debug for DataView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataView")
            .field("id", &self.id())
            .field("path", &self.current_path().to_string())
            .field("detached", &self.is_detached())
            .finish()
    }
}

/// An exclusive handle on one view of a [`DataContainer`].
pub struct DataViewMut<'a> {
    container: &'a mut DataContainer,
    index: usize,
}

impl fmt::Debug for DataViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DataViewMut").field(&self.as_view()).finish()
    }
}
