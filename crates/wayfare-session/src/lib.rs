//! Session and guest-state layer.
//!
//! [`SessionStore`] owns the mode state machine (Anonymous / Authenticated /
//! Guest), the persisted credential, and the current profile. Persistence
//! goes through injectable ports: a durable key-value store for the
//! credential (survives reload) and a volatile one for the guest flag
//! (tab-lifetime only). [`GuestTripStore`] holds guest trips purely in
//! memory; its contents are intentionally lost on any transition out of
//! Guest mode.

pub mod error;
mod guest;
mod ports;
mod store;

pub use error::{Error, GatewayError};
pub use guest::GuestTripStore;
pub use ports::{
    DurableStore, GenerationGateway, IdentityGateway, MemoryDurableStore, MemoryVolatileStore,
    VolatileStore,
};
pub use store::{CREDENTIAL_KEY, GUEST_FLAG_KEY, SessionMode, SessionStore, guest_profile};
