//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Compact format without the crate/module prefix (`with_target(false)`); the actor
//! loop tags every event with `entity_type` instead. Levels come from `RUST_LOG`.
//!
//! ```bash
//! # Creations, transitions, shutdown
//! RUST_LOG=info cargo run
//!
//! # Full create payloads, every Get/List, status changes
//! RUST_LOG=debug cargo run
//!
//! # Only the framework
//! RUST_LOG=delivery_lifecycle::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Actor started entity_type="Delivery" size=3
//! INFO Created entity_type="Delivery" id=0190f3c1-...
//! INFO Action ok entity_type="Delivery" id=0190f3c1-...
//! WARN Action failed entity_type="Delivery" id=0190f3c1-... error=Entity error: Invalid transition: in_transit -> in_transit
//! INFO Shutdown entity_type="Delivery"
//! ```
//!
//! A rejected transition shows up as a single `WARN` with the typed reason; the
//! stored record is not touched.

/// Installs the global subscriber. Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
