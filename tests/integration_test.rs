use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use delivery_lifecycle::clients::actor_client::ActorClient;
use delivery_lifecycle::delivery_actor::{Capability, DeliveryContext, DeliveryError, ManualClock};
use delivery_lifecycle::lifecycle::{DeliverySystem, TrackerConfig};
use delivery_lifecycle::model::{
    Address, CargoInfo, DeliveryCreate, DeliveryFilter, DeliveryId, DeliveryStatus,
};
use delivery_lifecycle::store::MemoryStore;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap()
}

fn la_to_sf() -> DeliveryCreate {
    DeliveryCreate {
        origin: Address::new("123 Warehouse St", "Los Angeles", "CA", "90001", "USA"),
        destination: Address::new("456 Customer Ave", "San Francisco", "CA", "94102", "USA"),
        cargo: CargoInfo::new("Electronics", 150.0, "48x40x36"),
        estimated_delivery: "2024-01-15T14:00".to_string(),
        assigned_driver: Some("Mike Driver".to_string()),
    }
}

/// A memory-backed system on a clock the test controls.
fn system_with_clock(clock: Arc<ManualClock>) -> DeliverySystem {
    DeliverySystem::with_store(MemoryStore::new(), DeliveryContext::new(clock), 32)
}

/// Full end-to-end lifecycle through the real actor:
/// create -> dispatch -> refused re-dispatch -> complete, then a refused cancel.
#[tokio::test]
async fn test_full_delivery_lifecycle() {
    let clock = Arc::new(ManualClock::new(start()));
    let system = system_with_clock(clock.clone());
    let client = &system.delivery_client;

    let created = client.create(la_to_sf()).await.expect("Failed to create delivery");
    assert_eq!(created.status, DeliveryStatus::Pending);
    assert!(created.tracking_number.is_well_formed());
    assert_eq!(created.created_at, start());
    assert_eq!(created.updated_at, created.created_at);
    assert_eq!(created.actual_delivery, None);
    assert_eq!(
        created.estimated_delivery,
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap()
    );

    clock.advance(Duration::hours(1));
    let dispatched = client
        .dispatch(created.id, Capability::ManageStatus)
        .await
        .expect("Failed to dispatch");
    assert_eq!(dispatched.status, DeliveryStatus::InTransit);
    assert!(dispatched.updated_at > created.updated_at);
    assert_eq!(dispatched.actual_delivery, None);

    // A second dispatch is a self-transition and changes nothing
    let err = client
        .dispatch(created.id, Capability::ManageStatus)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DeliveryError::InvalidTransition {
            from: DeliveryStatus::InTransit,
            to: DeliveryStatus::InTransit,
        }
    );
    assert_eq!(client.find(created.id).await.unwrap(), dispatched);

    clock.advance(Duration::hours(1));
    let handed_over = start() + Duration::minutes(90);
    let delivered = client
        .complete(created.id, Some(handed_over), Capability::ManageStatus)
        .await
        .expect("Failed to complete");
    assert_eq!(delivered.status, DeliveryStatus::Delivered);
    assert_eq!(delivered.actual_delivery, Some(handed_over));
    assert!(delivered.updated_at > dispatched.updated_at);

    // Terminal: nothing moves it any more, and the record is untouched
    let err = client
        .cancel(created.id, Capability::ManageStatus)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DeliveryError::InvalidTransition {
            from: DeliveryStatus::Delivered,
            to: DeliveryStatus::Cancelled,
        }
    );
    let stored = client.find(created.id).await.unwrap();
    assert_eq!(stored, delivered);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancelled_is_terminal() {
    let system = system_with_clock(Arc::new(ManualClock::new(start())));
    let client = &system.delivery_client;

    let created = client.create(la_to_sf()).await.unwrap();
    let cancelled = client.cancel(created.id, Capability::ManageStatus).await.unwrap();
    assert_eq!(cancelled.status, DeliveryStatus::Cancelled);
    assert_eq!(cancelled.actual_delivery, None);

    for target in DeliveryStatus::ALL {
        let result = client
            .transition(created.id, target, None, Capability::ManageStatus)
            .await;
        assert!(
            matches!(result, Err(DeliveryError::InvalidTransition { .. })),
            "cancelled -> {target} should be refused"
        );
    }
    assert_eq!(client.find(created.id).await.unwrap(), cancelled);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_pending_cannot_skip_to_delivered() {
    let system = system_with_clock(Arc::new(ManualClock::new(start())));
    let client = &system.delivery_client;

    let created = client.create(la_to_sf()).await.unwrap();
    let err = client
        .complete(created.id, None, Capability::ManageStatus)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DeliveryError::InvalidTransition {
            from: DeliveryStatus::Pending,
            to: DeliveryStatus::Delivered,
        }
    );
    assert_eq!(client.find(created.id).await.unwrap(), created);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_negative_weight_is_rejected() {
    let system = system_with_clock(Arc::new(ManualClock::new(start())));
    let client = &system.delivery_client;

    let mut params = la_to_sf();
    params.cargo.weight = -5.0;
    let err = client.create(params).await.unwrap_err();
    assert_eq!(err.field(), Some("cargo.weight"));

    let counts = client.status_counts().await.unwrap();
    assert_eq!(counts.total, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_read_only_caller_cannot_transition() {
    let system = system_with_clock(Arc::new(ManualClock::new(start())));
    let client = &system.delivery_client;

    let created = client.create(la_to_sf()).await.unwrap();
    let err = client.dispatch(created.id, Capability::ReadOnly).await.unwrap_err();
    assert_eq!(err, DeliveryError::PermissionDenied(DeliveryStatus::InTransit));
    assert_eq!(client.find(created.id).await.unwrap(), created);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let system = DeliverySystem::new();
    let client = &system.delivery_client;
    let missing = DeliveryId::from_u128(42);

    assert_eq!(client.get(missing).await.unwrap(), None);
    assert!(matches!(client.find(missing).await, Err(DeliveryError::NotFound(_))));
    assert!(matches!(
        client.dispatch(missing, Capability::ManageStatus).await,
        Err(DeliveryError::NotFound(_))
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_lookup_by_tracking_number_ignores_case() {
    let config = TrackerConfig::default().with_sample_data(true);
    let system = DeliverySystem::from_config(&config).await.unwrap();
    let client = &system.delivery_client;

    let found = client.find_by_tracking_number("trk-001-2024").await.unwrap();
    assert_eq!(found.id, DeliveryId::from_u128(1));
    assert_eq!(found.tracking_number.as_str(), "TRK-001-2024");

    let err = client.find_by_tracking_number("TRK-999-2024").await.unwrap_err();
    assert_eq!(err, DeliveryError::NotFound("TRK-999-2024".to_string()));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_list_filters_by_status_and_text() {
    let config = TrackerConfig::default().with_sample_data(true);
    let system = DeliverySystem::from_config(&config).await.unwrap();
    let client = &system.delivery_client;

    let mut to_chicago = la_to_sf();
    to_chicago.destination = Address::new("1 Lake St", "Chicago", "IL", "60601", "USA");
    let created = client.create(to_chicago).await.unwrap();

    let matched = client
        .list(
            DeliveryFilter::all()
                .with_status(DeliveryStatus::Pending)
                .with_text("chicago"),
        )
        .await
        .unwrap();
    let ids: Vec<_> = matched.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![created.id]);

    // Blank text is no filter at all
    let everything = client.list(DeliveryFilter::all().with_text("  ")).await.unwrap();
    assert_eq!(everything.len(), 4);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_recent_and_counts_dashboard() {
    let clock = Arc::new(ManualClock::new(start() + Duration::days(30)));
    let config = TrackerConfig::default().with_sample_data(true);
    let system = DeliverySystem::from_config_with_clock(&config, clock).await.unwrap();
    let client = &system.delivery_client;

    let created = client.create(la_to_sf()).await.unwrap();

    let recent = client.recent(3).await.unwrap();
    let codes: Vec<_> = recent.iter().map(|d| d.tracking_number.as_str().to_string()).collect();
    assert_eq!(
        codes,
        vec![
            created.tracking_number.as_str().to_string(),
            "TRK-002-2024".to_string(),
            "TRK-003-2024".to_string(),
        ]
    );

    let counts = client.status_counts().await.unwrap();
    assert_eq!(counts.total, 4);
    assert_eq!(counts.pending, 2);
    assert_eq!(counts.in_transit, 1);
    assert_eq!(counts.delivered, 1);
    assert_eq!(counts.cancelled, 0);

    system.shutdown().await.unwrap();
}

/// With the clock frozen every creation derives the same serial; the actor must
/// still hand out distinct tracking numbers.
#[tokio::test]
async fn test_tracking_numbers_unique_under_frozen_clock() {
    let system = system_with_clock(Arc::new(ManualClock::new(start())));
    let client = &system.delivery_client;

    let mut seen = HashSet::new();
    for _ in 0..25 {
        let created = client.create(la_to_sf()).await.unwrap();
        assert!(created.tracking_number.is_well_formed());
        assert!(seen.insert(created.tracking_number.normalized()));
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_updated_at_strictly_increases_under_frozen_clock() {
    let system = system_with_clock(Arc::new(ManualClock::new(start())));
    let client = &system.delivery_client;

    let created = client.create(la_to_sf()).await.unwrap();
    let dispatched = client.dispatch(created.id, Capability::ManageStatus).await.unwrap();
    let delivered = client.complete(created.id, None, Capability::ManageStatus).await.unwrap();

    assert_eq!(dispatched.updated_at, created.updated_at + Duration::milliseconds(1));
    assert_eq!(delivered.updated_at, dispatched.updated_at + Duration::milliseconds(1));
    // No explicit time: the hand-over is stamped from the clock
    assert_eq!(delivered.actual_delivery, Some(start()));

    system.shutdown().await.unwrap();
}

/// Many callers race to dispatch the same delivery; the actor serializes them so
/// exactly one wins and the rest see the already-moved state.
#[tokio::test]
async fn test_concurrent_transitions_on_same_delivery() {
    let system = system_with_clock(Arc::new(ManualClock::new(start())));
    let created = system.delivery_client.create(la_to_sf()).await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let client = system.delivery_client.clone();
        tasks.push(tokio::spawn(async move {
            client.dispatch(created.id, Capability::ManageStatus).await
        }));
    }

    let mut wins = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(delivery) => {
                wins += 1;
                assert_eq!(delivery.status, DeliveryStatus::InTransit);
            }
            Err(err) => assert_eq!(
                err,
                DeliveryError::InvalidTransition {
                    from: DeliveryStatus::InTransit,
                    to: DeliveryStatus::InTransit,
                }
            ),
        }
    }
    assert_eq!(wins, 1);

    system.shutdown().await.unwrap();
}
