//! The delivery status table.
//!
//! ```text
//! pending ──dispatch──> in_transit ──complete──> delivered
//!    │                      │
//!    └───────cancel─────────┴──────cancel──────> cancelled
//! ```
//!
//! `delivered` and `cancelled` are terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::Pending,
        DeliveryStatus::InTransit,
        DeliveryStatus::Delivered,
        DeliveryStatus::Cancelled,
    ];

    /// `delivered` and `cancelled` accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (Pending, InTransit) | (Pending, Cancelled) | (InTransit, Delivered) | (InTransit, Cancelled)
        )
    }

    /// Statuses reachable in one step from `self`.
    pub fn next_statuses(self) -> Vec<DeliveryStatus> {
        Self::ALL
            .into_iter()
            .filter(|next| self.can_transition_to(*next))
            .collect()
    }

    /// Wire name, as persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::InTransit => "In Transit",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown delivery status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for DeliveryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::DeliveryStatus::*;
    use super::*;

    #[test]
    fn test_transition_table() {
        assert_eq!(Pending.next_statuses(), vec![InTransit, Cancelled]);
        assert_eq!(InTransit.next_statuses(), vec![Delivered, Cancelled]);
        assert!(Delivered.next_statuses().is_empty());
        assert!(Cancelled.next_statuses().is_empty());
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for status in DeliveryStatus::ALL {
            assert_eq!(status.is_terminal(), status.next_statuses().is_empty(), "{status}");
        }
        assert!(Delivered.is_terminal());
        assert!(!InTransit.is_terminal());
    }

    #[test]
    fn test_no_skips_or_self_loops() {
        assert!(!Pending.can_transition_to(Delivered));
        for status in DeliveryStatus::ALL {
            assert!(!status.can_transition_to(status));
            assert!(!status.can_transition_to(Pending));
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("in_transit".parse::<DeliveryStatus>().unwrap(), InTransit);
        assert_eq!(" Delivered ".parse::<DeliveryStatus>().unwrap(), Delivered);
        assert!("lost".parse::<DeliveryStatus>().is_err());
        assert_eq!(InTransit.to_string(), "in_transit");
        assert_eq!(InTransit.label(), "In Transit");
        assert_eq!(serde_json::to_string(&InTransit).unwrap(), "\"in_transit\"");
    }
}
