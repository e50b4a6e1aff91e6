//! Concurrent id-to-item lookup table.
//!
//! Parent links on items are plain ids; walking upward goes through the
//! registry. Handlers outside this crate use [`ItemRegistry::get`] as the
//! item-by-identifier primitive.

use std::sync::Arc;

use dashmap::DashMap;

use librex_model::ItemId;

use crate::tree::item::ItemLike;

#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: DashMap<ItemId, Arc<dyn ItemLike>>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item under its own id, returning the displaced entry
    /// when the id was already present.
    pub fn insert(&self, item: Arc<dyn ItemLike>) -> Option<Arc<dyn ItemLike>> {
        self.items.insert(item.id(), item)
    }

    pub fn get(&self, id: ItemId) -> Option<Arc<dyn ItemLike>> {
        self.items.get(&id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: ItemId) -> Option<Arc<dyn ItemLike>> {
        self.items.remove(&id).map(|(_, item)| item)
    }

    /// Resolve an item's parent through the registry.
    pub fn parent_of(&self, item: &dyn ItemLike) -> Option<Arc<dyn ItemLike>> {
        item.parent().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
