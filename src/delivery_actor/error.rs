//! Error types for the Delivery actor.

use thiserror::Error;

use crate::model::DeliveryStatus;

/// Errors that can occur during delivery operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    /// Create input is missing a field or holds an unusable value.
    #[error("Delivery validation error: {field} {reason}")]
    Validation { field: String, reason: String },

    /// No delivery has the given id or tracking number.
    #[error("Delivery not found: {0}")]
    NotFound(String),

    /// The requested status change is not in the transition table.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: DeliveryStatus, to: DeliveryStatus },

    /// The caller's capability does not allow status changes.
    #[error("Permission denied: cannot move delivery to {0}")]
    PermissionDenied(DeliveryStatus),

    /// The storage collaborator failed; nothing was committed.
    #[error("Delivery storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl DeliveryError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        DeliveryError::Validation {
            field: field.into(),
            reason: "is required".to_string(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DeliveryError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The offending field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            DeliveryError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
