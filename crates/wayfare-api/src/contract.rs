use async_trait::async_trait;
use wayfare_model::{Credential, GeneratedPlan, Itinerary, Trip, TripDraft, UserProfile};

use crate::error::Error;
use crate::wire::NewUser;

/// Everything the client needs from the remote trip store.
///
/// The reqwest implementation is [`RemoteTripClient`](crate::RemoteTripClient);
/// tests substitute recording fakes. All operations are unary
/// request/response; callers do not retry and cannot cancel.
#[async_trait]
pub trait RemoteTripGateway: Send + Sync {
    async fn register(&self, new_user: &NewUser) -> Result<UserProfile, Error>;

    /// Exchange credentials for a bearer token (form-encoded per the
    /// backend's OAuth2 password flow).
    async fn login(&self, username_or_email: &str, password: &str) -> Result<Credential, Error>;

    async fn who_am_i(&self, credential: &Credential) -> Result<UserProfile, Error>;

    async fn list_trips(&self, credential: &Credential) -> Result<Vec<Trip>, Error>;

    async fn get_trip(&self, credential: &Credential, trip_id: i64) -> Result<Trip, Error>;

    async fn create_trip(&self, credential: &Credential, draft: &TripDraft) -> Result<Trip, Error>;

    /// Full replace of the trip's mutable fields.
    async fn update_trip(
        &self,
        credential: &Credential,
        trip_id: i64,
        draft: &TripDraft,
    ) -> Result<Trip, Error>;

    /// Expects a 204 "no content" success.
    async fn delete_trip(&self, credential: &Credential, trip_id: i64) -> Result<(), Error>;

    async fn list_itineraries(
        &self,
        credential: &Credential,
        trip_id: i64,
    ) -> Result<Vec<Itinerary>, Error>;

    /// Server assigns the version and persists the result.
    async fn generate_itinerary(
        &self,
        credential: &Credential,
        trip_id: i64,
    ) -> Result<Itinerary, Error>;

    async fn get_itinerary(
        &self,
        credential: &Credential,
        itinerary_id: i64,
    ) -> Result<Itinerary, Error>;

    async fn delete_itinerary(
        &self,
        credential: &Credential,
        itinerary_id: i64,
    ) -> Result<(), Error>;

    /// Unauthenticated, stateless generation for guest trips. Returns a plan
    /// without a version; the guest store assigns one. 429 maps to
    /// [`Error::RateLimited`].
    async fn generate_guest_itinerary(&self, draft: &TripDraft) -> Result<GeneratedPlan, Error>;
}
