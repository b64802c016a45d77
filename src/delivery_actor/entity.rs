//! ActorEntity trait implementation for the Delivery domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Delivery`] to be managed by the generic [`crate::framework::ResourceActor`].
//!
//! Creation validates the form input, stamps `createdAt`/`updatedAt` from the
//! injected clock and derives the tracking number. The only action is a status
//! transition, checked against [`DeliveryStatus::can_transition_to`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::actions::DeliveryAction;
use super::clock::{Clock, SystemClock};
use super::error::DeliveryError;
use super::validation::validate;
use crate::framework::ActorEntity;
use crate::model::{Delivery, DeliveryCreate, DeliveryFilter, DeliveryId, DeliveryStatus, TrackingNumber};

/// Dependencies injected into the Delivery actor at `run()` time.
#[derive(Debug, Clone)]
pub struct DeliveryContext {
    pub clock: Arc<dyn Clock>,
}

impl DeliveryContext {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Default for DeliveryContext {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Delivery {
    /// Applies one transition in place.
    ///
    /// Every check happens before the first write, so an `Err` leaves `self` untouched.
    pub fn transition_to(
        &mut self,
        target: DeliveryStatus,
        occurred_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<(), DeliveryError> {
        if !self.status.can_transition_to(target) {
            return Err(DeliveryError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        if target == DeliveryStatus::Delivered {
            self.actual_delivery = Some(occurred_at.unwrap_or(now));
        }
        self.updated_at = next_update_stamp(self.updated_at, now);
        Ok(())
    }
}

/// `now`, unless the clock has not moved past `previous`; then one millisecond later.
fn next_update_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[async_trait]
impl ActorEntity for Delivery {
    type Id = DeliveryId;
    type Create = DeliveryCreate;
    type Action = DeliveryAction;
    type ActionResult = Delivery;
    type Query = DeliveryFilter;
    type Context = DeliveryContext;
    type Error = DeliveryError;

    fn id(&self) -> &DeliveryId {
        &self.id
    }

    /// Creates a new `pending` Delivery from validated creation parameters.
    fn from_create_params(
        id: DeliveryId,
        params: DeliveryCreate,
        ctx: &DeliveryContext,
    ) -> Result<Self, DeliveryError> {
        let valid = validate(params)?;
        let now = ctx.clock.now();

        Ok(Self {
            id,
            tracking_number: TrackingNumber::generate(now, 0),
            status: DeliveryStatus::Pending,
            origin: valid.origin,
            destination: valid.destination,
            assigned_driver: valid.assigned_driver,
            estimated_delivery: valid.estimated_delivery,
            actual_delivery: None,
            cargo: valid.cargo,
            created_at: now,
            updated_at: now,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.tracking_number.normalized())
    }

    /// Steps the tracking serial forward from the creation time.
    fn rekey(&mut self, attempt: u32) {
        self.tracking_number = TrackingNumber::generate(self.created_at, attempt);
    }

    fn matches(&self, query: &DeliveryFilter) -> bool {
        query.matches(self)
    }

    /// Handles custom actions for the Delivery entity.
    ///
    /// # Actions
    /// - `Transition`: capability check, then the status table, then side effects.
    async fn handle_action(
        &mut self,
        action: DeliveryAction,
        ctx: &DeliveryContext,
    ) -> Result<Delivery, DeliveryError> {
        match action {
            DeliveryAction::Transition {
                target,
                occurred_at,
                capability,
            } => {
                if !capability.can_manage_status() {
                    return Err(DeliveryError::PermissionDenied(target));
                }
                let from = self.status;
                self.transition_to(target, occurred_at, ctx.clock.now())?;
                debug!(id = %self.id, %from, to = %target, "Status changed");
                Ok(self.clone())
            }
        }
    }
}
