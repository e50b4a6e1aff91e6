//! The virtual-child overlay: synthetic items injected into the root
//! without any filesystem backing.

use std::sync::Arc;

use parking_lot::RwLock;

use librex_model::ItemId;

use crate::tree::item::ItemLike;

/// Thread-safe multiset of virtual children.
///
/// Appends may race with snapshots; a snapshot taken during an append sees
/// either list, never a torn one. Nothing deduplicates on insert, so two
/// pushes of items with the same id leave two entries and [`find`] returns
/// the first inserted.
///
/// [`find`]: VirtualChildSet::find
#[derive(Debug, Default)]
pub struct VirtualChildSet {
    entries: RwLock<Vec<Arc<dyn ItemLike>>>,
}

impl VirtualChildSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: Arc<dyn ItemLike>) {
        self.entries.write().push(item);
    }

    pub fn find(&self, id: ItemId) -> Option<Arc<dyn ItemLike>> {
        self.entries
            .read()
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Clone of the current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<Arc<dyn ItemLike>> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
