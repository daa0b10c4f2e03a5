//! UI-facing trip and itinerary use cases.
//!
//! [`TripWorkflow`] is the single consumer contract over the dual-store
//! layout: every operation waits for the session's initial mode resolution,
//! branches strictly on session mode (Authenticated → remote gateway, Guest
//! → in-memory guest store, Anonymous → not authorized), and gates writes
//! behind client-side field validation and the geo-consistency check. All
//! errors are recovered at this boundary and carry a user-displayable
//! message.

mod adapters;
mod error;
mod workflow;

pub use adapters::{RemoteGeneration, RemoteIdentity};
pub use error::Error;
pub use workflow::TripWorkflow;
