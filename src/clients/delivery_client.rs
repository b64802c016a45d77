//! # Delivery Client
//!
//! Provides the lifecycle manager's public API on top of a `ResourceClient<Delivery>`:
//! `create`, `transition`, `find`, `find_by_tracking_number` and `list`, plus the
//! dashboard helpers built from `list`.

use crate::clients::actor_client::ActorClient;
use crate::delivery_actor::{Capability, DeliveryAction, DeliveryError};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Delivery, DeliveryCreate, DeliveryFilter, DeliveryId, DeliveryStatus, StatusCounts};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Delivery actor.
#[derive(Clone)]
pub struct DeliveryClient {
    inner: ResourceClient<Delivery>,
}

impl DeliveryClient {
    pub fn new(inner: ResourceClient<Delivery>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Delivery> for DeliveryClient {
    type Error = DeliveryError;

    fn inner(&self) -> &ResourceClient<Delivery> {
        &self.inner
    }

    /// Entity errors travel boxed through the framework; unbox them back into
    /// the typed variant the actor produced.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<DeliveryError>() {
                Ok(err) => *err,
                Err(other) => DeliveryError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => DeliveryError::NotFound(id),
            FrameworkError::Storage(err) => DeliveryError::Storage(err.to_string()),
            other => DeliveryError::ActorCommunication(other.to_string()),
        }
    }
}

impl DeliveryClient {
    /// Validates and stores a new `pending` delivery.
    #[instrument(skip(self, params))]
    pub async fn create(&self, params: DeliveryCreate) -> Result<Delivery, DeliveryError> {
        debug!(?params, "create called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Moves a delivery to `target`.
    ///
    /// `occurred_at` is used only when `target` is `delivered`.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        id: DeliveryId,
        target: DeliveryStatus,
        occurred_at: Option<DateTime<Utc>>,
        capability: Capability,
    ) -> Result<Delivery, DeliveryError> {
        debug!("Sending request");
        let action = DeliveryAction::Transition {
            target,
            occurred_at,
            capability,
        };
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// `pending -> in_transit`.
    pub async fn dispatch(&self, id: DeliveryId, capability: Capability) -> Result<Delivery, DeliveryError> {
        self.transition(id, DeliveryStatus::InTransit, None, capability).await
    }

    /// `in_transit -> delivered`, recording when the hand-over happened.
    pub async fn complete(
        &self,
        id: DeliveryId,
        occurred_at: Option<DateTime<Utc>>,
        capability: Capability,
    ) -> Result<Delivery, DeliveryError> {
        self.transition(id, DeliveryStatus::Delivered, occurred_at, capability)
            .await
    }

    /// `pending | in_transit -> cancelled`.
    pub async fn cancel(&self, id: DeliveryId, capability: Capability) -> Result<Delivery, DeliveryError> {
        self.transition(id, DeliveryStatus::Cancelled, None, capability).await
    }

    /// Looks up a delivery by id; absence is `NotFound`.
    #[instrument(skip(self))]
    pub async fn find(&self, id: DeliveryId) -> Result<Delivery, DeliveryError> {
        self.get(id)
            .await?
            .ok_or_else(|| DeliveryError::NotFound(id.to_string()))
    }

    /// Looks up a delivery by tracking number, ignoring case.
    #[instrument(skip(self))]
    pub async fn find_by_tracking_number(&self, code: &str) -> Result<Delivery, DeliveryError> {
        self.list_matching(DeliveryFilter::by_tracking_number(code))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DeliveryError::NotFound(code.trim().to_string()))
    }

    /// Deliveries matching `filter`, ordered and truncated as the filter asks.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: DeliveryFilter) -> Result<Vec<Delivery>, DeliveryError> {
        let arranged = filter.clone();
        let matched = self.list_matching(filter).await?;
        debug!(matched = matched.len(), "Listed deliveries");
        Ok(arranged.arrange(matched))
    }

    /// The `limit` most recently updated deliveries.
    pub async fn recent(&self, limit: usize) -> Result<Vec<Delivery>, DeliveryError> {
        self.list(DeliveryFilter::all().recently_updated().limit(limit))
            .await
    }

    /// Per-status totals across the whole collection.
    pub async fn status_counts(&self) -> Result<StatusCounts, DeliveryError> {
        let all = self.list_matching(DeliveryFilter::all()).await?;
        Ok(StatusCounts::tally(&all))
    }
}
