//! Demo deliveries loaded into an empty store when
//! [`TrackerConfig::seed_sample_data`](super::TrackerConfig::seed_sample_data) is set.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{Address, CargoInfo, Delivery, DeliveryId, DeliveryStatus, TrackingNumber};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// Three deliveries, one `pending`, one `in_transit`, one `delivered`.
pub fn sample_deliveries() -> Vec<Delivery> {
    vec![
        Delivery {
            id: DeliveryId::from_u128(1),
            tracking_number: TrackingNumber::from_raw("TRK-001-2024"),
            status: DeliveryStatus::Pending,
            origin: Address::new("123 Warehouse St", "Los Angeles", "CA", "90001", "USA"),
            destination: Address::new("456 Customer Ave", "San Francisco", "CA", "94102", "USA"),
            assigned_driver: Some("Mike Driver".to_string()),
            estimated_delivery: at(2024, 1, 15, 14, 0),
            actual_delivery: None,
            cargo: CargoInfo::new("Electronics shipment", 150.0, r#"48" x 40" x 36""#),
            created_at: at(2024, 1, 10, 10, 0),
            updated_at: at(2024, 1, 10, 10, 0),
        },
        Delivery {
            id: DeliveryId::from_u128(2),
            tracking_number: TrackingNumber::from_raw("TRK-002-2024"),
            status: DeliveryStatus::InTransit,
            origin: Address::new("789 Distribution Center", "Phoenix", "AZ", "85001", "USA"),
            destination: Address::new("321 Retail Store", "Denver", "CO", "80202", "USA"),
            assigned_driver: Some("Mike Driver".to_string()),
            estimated_delivery: at(2024, 1, 14, 16, 0),
            actual_delivery: None,
            cargo: CargoInfo::new("Clothing inventory", 200.0, r#"60" x 48" x 42""#),
            created_at: at(2024, 1, 8, 8, 0),
            updated_at: at(2024, 1, 12, 12, 0),
        },
        Delivery {
            id: DeliveryId::from_u128(3),
            tracking_number: TrackingNumber::from_raw("TRK-003-2024"),
            status: DeliveryStatus::Delivered,
            origin: Address::new("555 Factory Rd", "Detroit", "MI", "48201", "USA"),
            destination: Address::new("777 Business Plaza", "Chicago", "IL", "60601", "USA"),
            assigned_driver: Some("Mike Driver".to_string()),
            estimated_delivery: at(2024, 1, 10, 12, 0),
            actual_delivery: Some(at(2024, 1, 10, 11, 30)),
            cargo: CargoInfo::new("Auto parts", 300.0, r#"72" x 48" x 48""#),
            created_at: at(2024, 1, 5, 9, 0),
            updated_at: at(2024, 1, 10, 11, 30),
        },
    ]
}
