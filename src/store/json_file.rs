use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{EntityStore, MemoryStore, StoreError};
use crate::framework::ActorEntity;

/// A [`MemoryStore`] mirrored to a JSON file after every successful `put`.
///
/// The file holds one JSON object keyed by entity id. Writes go to a sibling
/// temporary file first and are renamed into place, so a crash mid-write leaves the
/// previous snapshot intact.
#[derive(Debug)]
pub struct JsonFileStore<T: ActorEntity> {
    path: PathBuf,
    inner: MemoryStore<T>,
}

impl<T> JsonFileStore<T>
where
    T: ActorEntity + Serialize + DeserializeOwned,
{
    /// Restores the collection from `path`. A missing file is an empty collection.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let by_id: BTreeMap<String, T> = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Deserialization(format!("{}: {}", path.display(), e)))?;
                MemoryStore::with_items(by_id.into_values())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemoryStore::new(),
            Err(e) => return Err(e.into()),
        };
        info!(path = %path.display(), size = inner.len(), "Opened JSON store");
        Ok(Self { path, inner })
    }

    async fn persist(&self, items: &[T]) -> Result<(), StoreError> {
        let by_id: BTreeMap<String, &T> = items.iter().map(|item| (item.id().to_string(), item)).collect();
        let bytes = serde_json::to_vec_pretty(&by_id).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                warn!(path = ?tmp, error = %cleanup, "Failed to remove temporary snapshot");
            }
            return Err(e.into());
        }
        debug!(path = %self.path.display(), size = items.len(), "Persisted JSON store");
        Ok(())
    }
}

#[async_trait]
impl<T> EntityStore<T> for JsonFileStore<T>
where
    T: ActorEntity + Serialize + DeserializeOwned,
{
    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        self.inner.get(id).await
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.inner.list().await
    }

    async fn put(&mut self, item: T) -> Result<(), StoreError> {
        let mut items = self.inner.snapshot();
        match items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        self.persist(&items).await?;
        self.inner.insert(item);
        Ok(())
    }
}
