//! Pure data structures (DTOs) for deliveries.
//!
//! [`Delivery`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait in
//! [`crate::delivery_actor::entity`]; everything here is plain data plus the pure
//! status table.

pub mod address;
pub mod delivery;
pub mod filter;
pub mod status;

pub use address::*;
pub use delivery::*;
pub use filter::*;
pub use status::*;
