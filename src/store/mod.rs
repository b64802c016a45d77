//! Storage collaborators for [`ResourceActor`](crate::framework::ResourceActor).
//!
//! The actor is the only writer; a store only has to remember what it is given
//! and hand it back in insertion order. Swapping [`MemoryStore`] for
//! [`JsonFileStore`] (or any other key-value backend) does not touch business rules.

mod error;
mod json_file;
mod memory;

pub use error::*;
pub use json_file::*;
pub use memory::*;

use crate::framework::ActorEntity;
use async_trait::async_trait;

/// Repository interface consumed by the actor.
#[async_trait]
pub trait EntityStore<T: ActorEntity>: Send + Sync + 'static {
    /// Fetch one entity by id.
    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError>;

    /// Every stored entity, in insertion order.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Insert a new entity or replace the one with the same id.
    ///
    /// On error the store must be left as it was before the call.
    async fn put(&mut self, item: T) -> Result<(), StoreError>;
}
