use std::sync::Arc;

use tracing::{error, info};

use super::{sample_deliveries, TrackerConfig};
use crate::clients::DeliveryClient;
use crate::delivery_actor::{Clock, DeliveryContext, SystemClock, DEFAULT_BUFFER_SIZE};
use crate::model::Delivery;
use crate::store::{EntityStore, JsonFileStore, MemoryStore, StoreError};

/// The runtime orchestrator for the delivery lifecycle manager.
///
/// `DeliverySystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the Delivery actor
/// - **Dependency Wiring**: Choosing the store and injecting the clock
/// - **Startup Restore**: Opening the persisted collection (and seeding it if asked)
///
/// # Example
///
/// ```ignore
/// let system = DeliverySystem::from_config(&TrackerConfig::from_env()).await?;
///
/// let delivery = system.delivery_client.create(params).await?;
/// system.delivery_client.dispatch(delivery.id, Capability::ManageStatus).await?;
///
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    /// Client for interacting with the Delivery actor
    pub delivery_client: DeliveryClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DeliverySystem {
    /// In-memory system on the wall clock. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), DeliveryContext::default(), DEFAULT_BUFFER_SIZE)
    }

    /// Spawns the Delivery actor over an already opened `store`.
    pub fn with_store<S: EntityStore<Delivery>>(store: S, context: DeliveryContext, buffer_size: usize) -> Self {
        let (delivery_actor, delivery_client) = crate::delivery_actor::new(store, buffer_size);
        let delivery_handle = tokio::spawn(delivery_actor.run(context));

        Self {
            delivery_client,
            handles: vec![delivery_handle],
        }
    }

    /// Builds the system described by `config`, on the wall clock.
    pub async fn from_config(config: &TrackerConfig) -> Result<Self, StoreError> {
        Self::from_config_with_clock(config, Arc::new(SystemClock)).await
    }

    pub async fn from_config_with_clock(config: &TrackerConfig, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let context = DeliveryContext::new(clock);
        match &config.store_path {
            Some(path) => {
                let mut store = JsonFileStore::open(path).await?;
                if config.seed_sample_data {
                    seed_if_empty(&mut store).await?;
                }
                Ok(Self::with_store(store, context, config.channel_capacity))
            }
            None => {
                let mut store = MemoryStore::new();
                if config.seed_sample_data {
                    seed_if_empty(&mut store).await?;
                }
                Ok(Self::with_store(store, context, config.channel_capacity))
            }
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the channel; the actor drains what is queued and
    /// exits. Returns an error if the actor task panicked. Clones of the client held
    /// elsewhere keep the actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.delivery_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for DeliverySystem {
    fn default() -> Self {
        Self::new()
    }
}

async fn seed_if_empty<S: EntityStore<Delivery>>(store: &mut S) -> Result<(), StoreError> {
    if !store.list().await?.is_empty() {
        return Ok(());
    }
    let samples = sample_deliveries();
    info!(count = samples.len(), "Seeding sample deliveries");
    for delivery in samples {
        store.put(delivery).await?;
    }
    Ok(())
}
