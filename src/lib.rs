//! # Delivery Lifecycle Manager
//!
//! > **Shipment records with a guarded status lifecycle, served by a single actor.**
//!
//! A delivery is created `pending` with a generated tracking number, moves to
//! `in_transit`, and ends either `delivered` (stamping `actualDelivery`) or
//! `cancelled`. Every change goes through one Tokio task that owns the collection,
//! so concurrent requests against the same delivery are applied one at a time.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Entities Guard Themselves
//! The framework knows nothing about deliveries. It asks the entity to validate its
//! create payload, to report its unique key, and to handle actions on a working
//! copy. A rejected action never reaches the store.
//!
//! ### No Generic Update
//! There is no field-level update request. Status moves only through
//! [`DeliveryAction::Transition`](delivery_actor::DeliveryAction), which checks the
//! caller's [`Capability`](delivery_actor::Capability) and then the transition table.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! [`DeliveryError`](delivery_actor::DeliveryError) travels boxed inside
//! [`FrameworkError::EntityError`](framework::FrameworkError) and is downcast back by
//! the client, so callers match on `Validation`, `NotFound`, `InvalidTransition` or
//! `PermissionDenied` directly.
//!
//! ### 2. Async Context Injection
//! The clock is injected at `run()` time through
//! [`DeliveryContext`](delivery_actor::DeliveryContext). Tests freeze it with
//! [`ManualClock`](delivery_actor::ManualClock).
//!
//! ### 3. Pluggable Storage
//! The actor writes through an [`EntityStore`](store::EntityStore): in memory, or a
//! JSON snapshot file that is restored on startup.
//!
//! ### 4. Observability
//! `tracing` events from the actor loop and `#[instrument]` spans on the client.
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T, S>` and its client.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor).
//!
//! ### 2. The Data ([`model`], [`store`])
//! Plain serde types for deliveries, statuses and list filters, and the stores they live in.
//!
//! ### 3. The Rules ([`delivery_actor`])
//! Validation, tracking numbers and the status lifecycle.
//!
//! ### 4. The Interface ([`clients`])
//! [`DeliveryClient`](clients::DeliveryClient): create, transition, find, list.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`DeliverySystem`](lifecycle::DeliverySystem) wires store, clock and actor from a
//! [`TrackerConfig`](lifecycle::TrackerConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs, persisting to a file
//! RUST_LOG=info DELIVERY_STORE_PATH=deliveries.json cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod clients;
pub mod delivery_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod store;
