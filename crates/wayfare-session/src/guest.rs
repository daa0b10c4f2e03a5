use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use wayfare_model::{Itinerary, Trip, TripDraft, TripOwner};

use crate::error::{Error, Result};
use crate::ports::GenerationGateway;

/// In-memory trip store for guest mode.
///
/// Exclusively owns the guest trip collection; the session store only clears
/// it at mode transitions. CRUD is synchronous pure mutation — the only
/// suspension point is the generation gateway call. Trip and itinerary ids
/// come from local monotonic counters and are never compared with remote
/// ids.
pub struct GuestTripStore {
    trips: Mutex<Vec<Trip>>,
    next_trip_id: AtomicI64,
    next_itinerary_id: AtomicI64,
    gateway: Arc<dyn GenerationGateway>,
}

impl GuestTripStore {
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            trips: Mutex::new(Vec::new()),
            next_trip_id: AtomicI64::new(1),
            next_itinerary_id: AtomicI64::new(1),
            gateway,
        }
    }

    /// Append a new trip built from the submitted fields. No server
    /// round-trip; the id is assigned locally.
    pub fn add_trip(&self, draft: TripDraft) -> Trip {
        let id = self.next_trip_id.fetch_add(1, Ordering::Relaxed);
        let trip = Trip::from_draft(id, TripOwner::Guest, draft);
        self.trips.lock().push(trip.clone());
        trip
    }

    /// Remove by id. Not found is a no-op.
    pub fn remove_trip(&self, trip_id: i64) {
        self.trips.lock().retain(|t| t.id != trip_id);
    }

    /// Replace the entry with a matching id wholesale, including its
    /// itinerary list. Not found is a no-op.
    pub fn update_trip(&self, trip: Trip) {
        let mut trips = self.trips.lock();
        if let Some(existing) = trips.iter_mut().find(|t| t.id == trip.id) {
            *existing = trip;
        }
    }

    pub fn get_trip(&self, trip_id: i64) -> Option<Trip> {
        self.trips.lock().iter().find(|t| t.id == trip_id).cloned()
    }

    pub fn list_trips(&self) -> Vec<Trip> {
        self.trips.lock().clone()
    }

    /// Generate a new itinerary for a guest trip.
    ///
    /// The gateway is stateless per call and returns a plan without a
    /// version, so the version is assigned here:
    /// `1 + max(existing versions, default 0)`. For a single trip the
    /// versions therefore form a strictly increasing, gap-free-from-1
    /// sequence as observed by this store. The new itinerary is prepended
    /// (newest first).
    pub async fn generate_itinerary(&self, trip_id: i64) -> Result<Itinerary> {
        // Snapshot outside the lock; the await below must not hold it.
        let draft = {
            let trips = self.trips.lock();
            let trip = trips
                .iter()
                .find(|t| t.id == trip_id)
                .ok_or(Error::TripNotFound(trip_id))?;
            TripDraft::from(trip)
        };

        let generated = self
            .gateway
            .generate(&draft)
            .await
            .map_err(Error::Generation)?;

        let mut trips = self.trips.lock();
        // The trip may have been removed while the request was in flight.
        let trip = trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or(Error::TripNotFound(trip_id))?;

        let itinerary = Itinerary {
            id: self.next_itinerary_id.fetch_add(1, Ordering::Relaxed),
            trip_id,
            generated_at: generated.generated_at.unwrap_or_else(Utc::now),
            version: trip.max_itinerary_version() + 1,
            plan: generated.plan,
            total_estimated_cost: generated.total_estimated_cost,
            total_estimated_duration_minutes: generated.total_estimated_duration_minutes,
        };
        trip.itineraries.insert(0, itinerary.clone());
        Ok(itinerary)
    }

    /// Filter the itinerary out of the trip's list. Sibling versions are
    /// untouched and never renumbered.
    pub fn remove_itinerary(&self, trip_id: i64, itinerary_id: i64) {
        let mut trips = self.trips.lock();
        if let Some(trip) = trips.iter_mut().find(|t| t.id == trip_id) {
            trip.itineraries.retain(|i| i.id != itinerary_id);
        }
    }

    /// Discard all guest trips. Called by the session store whenever the
    /// session leaves Guest mode.
    pub fn clear(&self) {
        self.trips.lock().clear();
    }
}
