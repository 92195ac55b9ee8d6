//! Requested attribute sets.

use std::collections::{HashSet, hash_set};

use serde::{Deserialize, Serialize};

use crate::AttributeHandle;

/// A set of attribute handles, as sent by a caller asking for values.
///
/// Duplicates collapse on insertion. `Clone` produces an independent copy:
/// the copy owns its own storage, so mutating one set never affects the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeHandleSet {
    handles: HashSet<AttributeHandle>,
}

impl AttributeHandleSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw identifiers, wrapping each into an
    /// [`AttributeHandle`].
    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        raw.into_iter().map(AttributeHandle::new).collect()
    }

    /// Add a handle. Returns `false` if it was already present.
    pub fn insert(&mut self, handle: AttributeHandle) -> bool {
        self.handles.insert(handle)
    }

    /// Remove a handle. Returns `false` if it was not present.
    pub fn remove(&mut self, handle: AttributeHandle) -> bool {
        self.handles.remove(&handle)
    }

    /// Membership test.
    pub fn contains(&self, handle: AttributeHandle) -> bool {
        self.handles.contains(&handle)
    }

    /// Number of distinct handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True if the set holds no handles.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterate over the handles in unspecified order.
    pub fn iter(&self) -> hash_set::Iter<'_, AttributeHandle> {
        self.handles.iter()
    }
}

impl FromIterator<AttributeHandle> for AttributeHandleSet {
    fn from_iter<T: IntoIterator<Item = AttributeHandle>>(iter: T) -> Self {
        Self { handles: iter.into_iter().collect() }
    }
}

impl Extend<AttributeHandle> for AttributeHandleSet {
    fn extend<T: IntoIterator<Item = AttributeHandle>>(&mut self, iter: T) {
        self.handles.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AttributeHandleSet {
    type Item = &'a AttributeHandle;
    type IntoIter = hash_set::Iter<'a, AttributeHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.handles.iter()
    }
}

impl IntoIterator for AttributeHandleSet {
    type Item = AttributeHandle;
    type IntoIter = hash_set::IntoIter<AttributeHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.handles.into_iter()
    }
}
