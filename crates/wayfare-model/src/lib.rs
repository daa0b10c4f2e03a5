//! Canonical data model for the Wayfare trip-planning client.
//!
//! Everything above the storage boundary operates on these types: the remote
//! API client and the in-memory guest store both produce the same [`Trip`] and
//! [`Itinerary`] shapes, so the workflow layer never branches on payload
//! shape, only on session mode. Place-picker results are converted into
//! [`PlaceGeoData`] at the boundary; internal logic never sees the widget's
//! native result type.

pub mod geo;
mod types;
pub mod validate;

pub use geo::{CONTAINMENT_RADIUS_KM, GeoError, GeoStrategy, check_containment, haversine_km};
pub use types::{
    Activity, Credential, DailyPlan, GeneratedPlan, Itinerary, ItineraryPlan, PlaceGeoData, Trip,
    TripDraft, TripOwner, UserProfile,
};
pub use validate::{ValidationError, validate_draft};
