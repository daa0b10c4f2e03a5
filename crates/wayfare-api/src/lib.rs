//! Remote trip/itinerary API gateway.
//!
//! [`RemoteTripGateway`] is the contract the rest of the client programs
//! against; [`RemoteTripClient`] is its reqwest-backed implementation. The
//! client is a stateless gateway: it owns no trip data and attaches the
//! caller's credential as a bearer header on every authenticated call.

mod client;
mod contract;
pub mod error;
mod wire;

pub use client::RemoteTripClient;
pub use contract::RemoteTripGateway;
pub use error::{Error, FieldError};
pub use wire::NewUser;
