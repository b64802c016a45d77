//! Custom actions for the Delivery actor.
//!
//! A delivery has exactly one mutating operation: a status transition. The caller
//! states what it is allowed to do through a [`Capability`]; the actor never looks
//! at who the caller is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::DeliveryStatus;

/// Custom actions for Delivery entities.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryAction {
    /// Move the delivery to `target`.
    ///
    /// `occurred_at` is only read for the `delivered` edge and defaults to now.
    Transition {
        target: DeliveryStatus,
        occurred_at: Option<DateTime<Utc>>,
        capability: Capability,
    },
}

/// Permission flag supplied by the caller with every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May move deliveries through the lifecycle.
    ManageStatus,
    /// May look, not touch.
    ReadOnly,
}

impl Capability {
    pub fn can_manage_status(self) -> bool {
        self == Capability::ManageStatus
    }
}

/// User roles of the tracking front end.
///
/// Only the presentation layer knows about roles; it hands the actor the
/// [`Capability`] a role maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Driver,
    Dispatcher,
    Admin,
}

impl Role {
    pub fn capability(self) -> Capability {
        match self {
            Role::Admin | Role::Dispatcher => Capability::ManageStatus,
            Role::Driver => Capability::ReadOnly,
        }
    }
}

impl From<Role> for Capability {
    fn from(role: Role) -> Self {
        role.capability()
    }
}
