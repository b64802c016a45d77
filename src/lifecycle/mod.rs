//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the delivery tracker: creating the
//! Delivery actor, choosing its store, injecting its clock and shutting it down.
//!
//! ## The DeliverySystem Pattern
//!
//! ```rust,ignore
//! impl DeliverySystem {
//!     pub fn with_store<S: EntityStore<Delivery>>(store: S, context: DeliveryContext, buffer_size: usize) -> Self {
//!         // 1. Create the actor (no dependencies yet)
//!         let (delivery_actor, delivery_client) = delivery_actor::new(store, buffer_size);
//!
//!         // 2. Start it with its context injected
//!         let delivery_handle = tokio::spawn(delivery_actor.run(context));
//!
//!         Self { delivery_client, handles: vec![delivery_handle] }
//!     }
//! }
//! ```
//!
//! ## Dependency Injection via Context
//!
//! The Delivery actor's `Context` is a [`DeliveryContext`](crate::delivery_actor::DeliveryContext)
//! holding the clock. Tests inject a
//! [`ManualClock`](crate::delivery_actor::ManualClock); production uses the wall clock.
//!
//! ## Startup Restore
//!
//! With a `store_path` configured, [`DeliverySystem::from_config`] reopens the JSON
//! snapshot before the actor starts, so the first request already sees every
//! previously committed delivery.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - Wait for the actor task to finish
//!
//! ## Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for the entire system.
//! See the [`tracing`] module for the log format.

pub mod config;
pub mod delivery_system;
pub mod seed;
pub mod tracing;

pub use config::*;
pub use delivery_system::*;
pub use seed::*;
pub use tracing::*;
