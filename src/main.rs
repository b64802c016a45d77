//! # Delivery Lifecycle Demo
//!
//! Drives one shipment from Los Angeles to San Francisco through its whole
//! lifecycle, then shows the requests the manager refuses.
//!
//! Configuration comes from `DELIVERY_*` environment variables, see
//! [`TrackerConfig::from_env`].

use delivery_lifecycle::delivery_actor::{Capability, Role};
use delivery_lifecycle::lifecycle::{setup_tracing, DeliverySystem, TrackerConfig};
use delivery_lifecycle::model::{Address, CargoInfo, DeliveryCreate, DeliveryFilter, DeliveryStatus};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = TrackerConfig::from_env();
    info!(?config, "Starting delivery tracker");

    let system = DeliverySystem::from_config(&config)
        .await
        .map_err(|e| e.to_string())?;
    let deliveries = &system.delivery_client;

    let params = shipment(150.0);

    let span = tracing::info_span!("delivery_lifecycle");
    let delivered = async {
        let created = deliveries.create(params).await.map_err(|e| e.to_string())?;
        info!(tracking = %created.tracking_number, status = %created.status, "Delivery created");

        let dispatcher = Role::Dispatcher.capability();
        deliveries.dispatch(created.id, dispatcher).await.map_err(|e| e.to_string())?;
        let done = deliveries
            .complete(created.id, None, dispatcher)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            tracking = %done.tracking_number,
            actual_delivery = ?done.actual_delivery,
            "Delivery completed"
        );
        Ok::<_, String>(done)
    }
    .instrument(span)
    .await?;

    // Each of these must be refused and leave the record untouched
    let span = tracing::info_span!("rejected_requests");
    async {
        if let Err(e) = deliveries.cancel(delivered.id, Capability::ManageStatus).await {
            warn!(error = %e, "Cancel refused");
        }
        if let Err(e) = deliveries.dispatch(delivered.id, Role::Driver.into()).await {
            warn!(error = %e, "Dispatch refused");
        }
        if let Err(e) = deliveries.create(shipment(-5.0)).await {
            warn!(error = %e, field = ?e.field(), "Create refused");
        }
    }
    .instrument(span)
    .await;

    let counts = deliveries.status_counts().await.map_err(|e| e.to_string())?;
    info!(?counts, "Status counts");

    let code = delivered.tracking_number.as_str().to_lowercase();
    match deliveries.find_by_tracking_number(&code).await {
        Ok(found) => info!(%code, status = %found.status, "Found by tracking number"),
        Err(e) => warn!(%code, error = %e, "Lookup failed"),
    }

    let in_flight = deliveries
        .list(DeliveryFilter::all().with_status(DeliveryStatus::InTransit))
        .await
        .map_err(|e| e.to_string())?;
    info!(count = in_flight.len(), "In transit");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

fn shipment(weight: f64) -> DeliveryCreate {
    DeliveryCreate {
        origin: Address::new("123 Warehouse St", "Los Angeles", "CA", "90001", "USA"),
        destination: Address::new("456 Customer Ave", "San Francisco", "CA", "94102", "USA"),
        cargo: CargoInfo::new("Electronics", weight, r#"48" x 40" x 36""#),
        estimated_delivery: "2024-01-15T14:00".to_string(),
        assigned_driver: Some("Mike Driver".to_string()),
    }
}
