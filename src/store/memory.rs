use std::collections::HashMap;

use async_trait::async_trait;

use super::{EntityStore, StoreError};
use crate::framework::ActorEntity;

/// Ordered in-memory collection. Never fails.
#[derive(Debug, Clone)]
pub struct MemoryStore<T: ActorEntity> {
    order: Vec<T::Id>,
    items: HashMap<T::Id, T>,
}

impl<T: ActorEntity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }
}

impl<T: ActorEntity> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-filled with `items`, later duplicates replacing earlier ones.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut store = Self::new();
        for item in items {
            store.insert(item);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect()
    }

    pub(crate) fn insert(&mut self, item: T) {
        let id = item.id().clone();
        if self.items.insert(id.clone(), item).is_none() {
            self.order.push(id);
        }
    }
}

#[async_trait]
impl<T: ActorEntity> EntityStore<T> for MemoryStore<T> {
    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.items.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.snapshot())
    }

    async fn put(&mut self, item: T) -> Result<(), StoreError> {
        self.insert(item);
        Ok(())
    }
}
