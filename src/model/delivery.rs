//! A single shipment record with lifecycle status.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`impl ActorEntity for Delivery`](#impl-ActorEntity-for-Delivery) for details on:
//! - Creation parameters ([`DeliveryCreate`])
//! - Custom actions ([`DeliveryAction`](crate::delivery_actor::DeliveryAction))

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

use super::{Address, CargoInfo, DeliveryStatus};

/// Type-safe identifier for Deliveries. UUIDv7, so ids sort in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(pub Uuid);

impl DeliveryId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl Default for DeliveryId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for DeliveryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Human-facing lookup code: `TRK-<6 digits>-<year>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    const PREFIX: &'static str = "TRK";
    const SERIAL_SPACE: i64 = 1_000_000;

    /// Derives a tracking number from the creation time.
    ///
    /// The serial is the last six digits of the Unix-millisecond timestamp, advanced
    /// by `offset` (used to step past collisions) and wrapped into six digits.
    pub fn generate(created_at: DateTime<Utc>, offset: u32) -> Self {
        let serial = (created_at.timestamp_millis() + i64::from(offset)).rem_euclid(Self::SERIAL_SPACE);
        Self(format!("{}-{:06}-{}", Self::PREFIX, serial, created_at.year()))
    }

    /// Wraps an existing code verbatim (seed data, restored snapshots).
    pub fn from_raw(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive form used for uniqueness and lookups.
    pub fn normalized(&self) -> String {
        Self::normalize(&self.0)
    }

    pub fn normalize(code: &str) -> String {
        code.trim().to_ascii_uppercase()
    }

    /// Whether `code` names this tracking number, ignoring case and surrounding whitespace.
    pub fn matches_code(&self, code: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(code.trim())
    }

    /// Whether this code has the generated shape `TRK-dddddd-yyyy`.
    pub fn is_well_formed(&self) -> bool {
        let mut parts = self.0.split('-');
        let (Some(prefix), Some(serial), Some(year), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        prefix == Self::PREFIX
            && serial.len() == 6
            && serial.bytes().all(|b| b.is_ascii_digit())
            && year.len() == 4
            && year.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Display for TrackingNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: DeliveryId,
    pub tracking_number: TrackingNumber,
    pub status: DeliveryStatus,
    pub origin: Address,
    pub destination: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_driver: Option<String>,
    pub estimated_delivery: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery: Option<DateTime<Utc>>,
    pub cargo: CargoInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new delivery, as submitted by a form.
///
/// Nothing here is trusted: blank strings count as missing, and
/// `estimated_delivery` is parsed during creation.
#[derive(Debug, Clone, Default)]
pub struct DeliveryCreate {
    pub origin: Address,
    pub destination: Address,
    pub cargo: CargoInfo,
    pub estimated_delivery: String,
    pub assigned_driver: Option<String>,
}
