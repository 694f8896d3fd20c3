//! Domain layer: value objects, broadcast events and the interfaces the use
//! cases depend on.
//!
//! Concrete implementations live in the infrastructure layer (dependency
//! inversion): the domain defines what it needs, infrastructure provides it.

mod backplane;
mod error;
mod event;
mod identity;
mod router;
mod store;
mod value_object;

pub use backplane::{Backplane, Subscription};
pub use error::{BackplaneError, DomainError, RouterError, StoreError};
pub use event::RoomEvent;
pub use identity::{AuthPolicy, IdentityProvider};
pub use router::{BroadcastRouter, SessionSender};
pub use store::KeyValueStore;
#[cfg(test)]
pub use store::MockKeyValueStore;
pub use value_object::{ChannelKind, GroupName, RoomName, SessionId, Username};
