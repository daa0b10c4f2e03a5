use std::sync::Arc;

use wayfare_api::{NewUser, RemoteTripGateway};
use wayfare_model::{
    Credential, GeoError, GeoStrategy, Itinerary, PlaceGeoData, Trip, TripDraft, UserProfile,
    check_containment, validate_draft,
};
use wayfare_session::{SessionMode, SessionStore};

use crate::error::Error;

/// UI-facing use cases over the dual-store layout.
///
/// Every operation awaits the session's initial mode resolution, then
/// branches strictly on mode: Authenticated routes to the remote gateway,
/// Guest to the in-memory guest store, Anonymous performs no data operation.
/// Remote mutations are not optimistic — callers update their local state
/// only after the gateway confirms. Nothing here retries or de-duplicates;
/// serializing user actions is the caller's job.
pub struct TripWorkflow {
    session: Arc<SessionStore>,
    remote: Arc<dyn RemoteTripGateway>,
    geo_strategy: GeoStrategy,
}

impl TripWorkflow {
    pub fn new(
        session: Arc<SessionStore>,
        remote: Arc<dyn RemoteTripGateway>,
        geo_strategy: GeoStrategy,
    ) -> Self {
        Self {
            session,
            remote,
            geo_strategy,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // -----------------------------------------------------------------------
    // Auth glue
    // -----------------------------------------------------------------------

    pub async fn register(&self, new_user: &NewUser) -> Result<UserProfile, Error> {
        Ok(self.remote.register(new_user).await?)
    }

    /// Exchange credentials for a token, then hand it to the session store
    /// (which validates it and enters Authenticated).
    pub async fn sign_in(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<UserProfile, Error> {
        self.session.ready().await;
        let credential = self.remote.login(username_or_email, password).await?;
        let profile = self.session.login(credential).await?;
        tracing::debug!(username = %profile.username, "signed in");
        Ok(profile)
    }

    pub async fn continue_as_guest(&self) -> UserProfile {
        self.session.ready().await;
        self.session.login_as_guest()
    }

    pub fn sign_out(&self) {
        self.session.logout();
    }

    // -----------------------------------------------------------------------
    // Trips
    // -----------------------------------------------------------------------

    pub async fn list_trips(&self) -> Result<Vec<Trip>, Error> {
        match self.mode().await {
            SessionMode::Authenticated => Ok(self.remote.list_trips(&self.credential()?).await?),
            SessionMode::Guest => Ok(self.session.guest_trips().list_trips()),
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, Error> {
        match self.mode().await {
            SessionMode::Authenticated => {
                Ok(self.remote.get_trip(&self.credential()?, trip_id).await?)
            }
            SessionMode::Guest => self
                .session
                .guest_trips()
                .get_trip(trip_id)
                .ok_or(Error::TripNotFound(trip_id)),
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    /// Create a trip. Field validation and, when a lodging place was
    /// selected, the geo-consistency check both run before either store is
    /// touched.
    pub async fn create_trip(
        &self,
        draft: TripDraft,
        city_place: Option<&PlaceGeoData>,
        lodging_place: Option<&PlaceGeoData>,
    ) -> Result<Trip, Error> {
        let mode = self.mode().await;
        self.gate_write(&draft, city_place, lodging_place)?;

        match mode {
            SessionMode::Authenticated => {
                Ok(self.remote.create_trip(&self.credential()?, &draft).await?)
            }
            SessionMode::Guest => Ok(self.session.guest_trips().add_trip(draft)),
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    /// Full replace of a trip's mutable fields. The guest path preserves the
    /// trip's existing itinerary list.
    pub async fn update_trip(
        &self,
        trip_id: i64,
        draft: TripDraft,
        city_place: Option<&PlaceGeoData>,
        lodging_place: Option<&PlaceGeoData>,
    ) -> Result<Trip, Error> {
        let mode = self.mode().await;
        self.gate_write(&draft, city_place, lodging_place)?;

        match mode {
            SessionMode::Authenticated => Ok(self
                .remote
                .update_trip(&self.credential()?, trip_id, &draft)
                .await?),
            SessionMode::Guest => {
                let guest = self.session.guest_trips();
                let existing = guest
                    .get_trip(trip_id)
                    .ok_or(Error::TripNotFound(trip_id))?;
                let mut updated = Trip::from_draft(trip_id, existing.owner, draft);
                updated.itineraries = existing.itineraries;
                guest.update_trip(updated.clone());
                Ok(updated)
            }
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    /// Delete a trip. On success the caller drops it from local state; no
    /// re-fetch is needed.
    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), Error> {
        match self.mode().await {
            SessionMode::Authenticated => {
                Ok(self.remote.delete_trip(&self.credential()?, trip_id).await?)
            }
            SessionMode::Guest => {
                self.session.guest_trips().remove_trip(trip_id);
                Ok(())
            }
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    // -----------------------------------------------------------------------
    // Itineraries
    // -----------------------------------------------------------------------

    pub async fn list_itineraries(&self, trip_id: i64) -> Result<Vec<Itinerary>, Error> {
        match self.mode().await {
            SessionMode::Authenticated => Ok(self
                .remote
                .list_itineraries(&self.credential()?, trip_id)
                .await?),
            SessionMode::Guest => self
                .session
                .guest_trips()
                .get_trip(trip_id)
                .map(|t| t.itineraries)
                .ok_or(Error::TripNotFound(trip_id)),
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    /// Generate a new itinerary. Authenticated: the server assigns the
    /// version and persists. Guest: the guest store calls the
    /// unauthenticated gateway and assigns the version client-side.
    pub async fn generate_itinerary(&self, trip_id: i64) -> Result<Itinerary, Error> {
        match self.mode().await {
            SessionMode::Authenticated => Ok(self
                .remote
                .generate_itinerary(&self.credential()?, trip_id)
                .await?),
            SessionMode::Guest => Ok(self
                .session
                .guest_trips()
                .generate_itinerary(trip_id)
                .await?),
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    pub async fn get_itinerary(&self, trip_id: i64, itinerary_id: i64) -> Result<Itinerary, Error> {
        match self.mode().await {
            SessionMode::Authenticated => Ok(self
                .remote
                .get_itinerary(&self.credential()?, itinerary_id)
                .await?),
            SessionMode::Guest => {
                let trip = self
                    .session
                    .guest_trips()
                    .get_trip(trip_id)
                    .ok_or(Error::TripNotFound(trip_id))?;
                trip.itineraries
                    .into_iter()
                    .find(|i| i.id == itinerary_id)
                    .ok_or(Error::ItineraryNotFound(itinerary_id))
            }
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    pub async fn delete_itinerary(&self, trip_id: i64, itinerary_id: i64) -> Result<(), Error> {
        match self.mode().await {
            SessionMode::Authenticated => Ok(self
                .remote
                .delete_itinerary(&self.credential()?, itinerary_id)
                .await?),
            SessionMode::Guest => {
                self.session
                    .guest_trips()
                    .remove_itinerary(trip_id, itinerary_id);
                Ok(())
            }
            SessionMode::Anonymous => Err(Error::NotAuthorized),
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    async fn mode(&self) -> SessionMode {
        self.session.ready().await;
        self.session.mode()
    }

    fn credential(&self) -> Result<Credential, Error> {
        self.session.credential().ok_or(Error::NotAuthorized)
    }

    /// Client-side gate run before any write reaches a store: field
    /// validation first, then geo consistency when a lodging was selected.
    /// A selected lodging with no resolvable city place cannot be verified.
    fn gate_write(
        &self,
        draft: &TripDraft,
        city_place: Option<&PlaceGeoData>,
        lodging_place: Option<&PlaceGeoData>,
    ) -> Result<(), Error> {
        validate_draft(draft)?;
        if let Some(lodging) = lodging_place {
            let city = city_place.ok_or(Error::Geo(GeoError::Unverifiable))?;
            if let Err(err) = check_containment(city, lodging, self.geo_strategy) {
                tracing::debug!(error = %err, "rejected trip write on geo check");
                return Err(err.into());
            }
        }
        Ok(())
    }
}
