//! Delivery-specific resource logic: validation, the status lifecycle and
//! tracking-number assignment.

mod actions;
pub mod clock;
pub mod entity;
pub mod error;
pub mod validation;

pub use actions::*;
pub use clock::*;
pub use entity::DeliveryContext;
pub use error::*;

use crate::clients::DeliveryClient;
use crate::framework::ResourceActor;
use crate::model::{Delivery, DeliveryId};
use crate::store::EntityStore;

/// Channel capacity used when the caller has no preference.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates a new Delivery actor over `store` and its client.
///
/// The actor does nothing until `run(context)` is spawned.
pub fn new<S: EntityStore<Delivery>>(store: S, buffer_size: usize) -> (ResourceActor<Delivery, S>, DeliveryClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, store, DeliveryId::new);
    let client = DeliveryClient::new(generic_client);

    (actor, client)
}
