use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use wayfare_api::{Error as ApiError, NewUser, RemoteTripGateway};
use wayfare_model::{
    Credential, DailyPlan, GeneratedPlan, GeoStrategy, Itinerary, ItineraryPlan, PlaceGeoData,
    Trip, TripDraft, UserProfile,
};
use wayfare_session::{
    MemoryDurableStore, MemoryVolatileStore, SessionMode, SessionStore,
};
use wayfare_workflow::{Error, RemoteGeneration, RemoteIdentity, TripWorkflow};

const TOKEN: &str = "good-token";

fn profile() -> UserProfile {
    UserProfile {
        id: 42,
        username: "johndoe".to_string(),
        email: "john.doe@example.com".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
    }
}

fn plan(title: &str) -> ItineraryPlan {
    ItineraryPlan {
        title: title.to_string(),
        duration_days: 3,
        daily_plans: vec![DailyPlan {
            day_number: 1,
            day_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            theme: None,
            activities: Vec::new(),
        }],
        notes: None,
    }
}

fn draft(name: &str) -> TripDraft {
    TripDraft {
        name: name.to_string(),
        city: "Paris, France".to_string(),
        stay_address: Some("123 Rue de Rivoli".to_string()),
        start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
        num_travelers: 2,
        budget_per_person: Some(100.0),
        activity_preferences: vec!["museums".to_string()],
    }
}

fn place(country: &str, locality: &str) -> PlaceGeoData {
    PlaceGeoData {
        place_id: format!("place-{locality}"),
        name: locality.to_string(),
        country: country.to_string(),
        locality: locality.to_string(),
        lat: None,
        lng: None,
    }
}

/// Records every remote call and keeps a tiny fake server state, so tests
/// can assert exactly which operations hit the network and with what.
#[derive(Default)]
struct FakeRemote {
    calls: Mutex<Vec<String>>,
    trips: Mutex<Vec<Trip>>,
    next_id: AtomicI64,
    guest_generation_fails_with_rate_limit: bool,
}

impl FakeRemote {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn check(&self, credential: &Credential) -> Result<(), ApiError> {
        if credential.as_str() == TOKEN {
            Ok(())
        } else {
            Err(ApiError::Unauthorized("Could not validate credentials".to_string()))
        }
    }
}

#[async_trait]
impl RemoteTripGateway for FakeRemote {
    async fn register(&self, new_user: &NewUser) -> Result<UserProfile, ApiError> {
        self.record(format!("register:{}", new_user.username));
        Ok(profile())
    }

    async fn login(&self, username_or_email: &str, _password: &str) -> Result<Credential, ApiError> {
        self.record(format!("login:{username_or_email}"));
        Ok(Credential::new(TOKEN))
    }

    async fn who_am_i(&self, credential: &Credential) -> Result<UserProfile, ApiError> {
        self.record("who_am_i");
        self.check(credential)?;
        Ok(profile())
    }

    async fn list_trips(&self, credential: &Credential) -> Result<Vec<Trip>, ApiError> {
        self.record("list_trips");
        self.check(credential)?;
        Ok(self.trips.lock().clone())
    }

    async fn get_trip(&self, credential: &Credential, trip_id: i64) -> Result<Trip, ApiError> {
        self.record(format!("get_trip:{trip_id}"));
        self.check(credential)?;
        self.trips
            .lock()
            .iter()
            .find(|t| t.id == trip_id)
            .cloned()
            .ok_or(ApiError::Api {
                status: 404,
                message: "Trip not found".to_string(),
            })
    }

    async fn create_trip(&self, credential: &Credential, draft: &TripDraft) -> Result<Trip, ApiError> {
        self.record(format!("create_trip:{}", draft.name));
        self.check(credential)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let trip = Trip::from_draft(id, wayfare_model::TripOwner::User { id: 42 }, draft.clone());
        self.trips.lock().push(trip.clone());
        Ok(trip)
    }

    async fn update_trip(
        &self,
        credential: &Credential,
        trip_id: i64,
        draft: &TripDraft,
    ) -> Result<Trip, ApiError> {
        self.record(format!("update_trip:{trip_id}"));
        self.check(credential)?;
        let updated = Trip::from_draft(
            trip_id,
            wayfare_model::TripOwner::User { id: 42 },
            draft.clone(),
        );
        let mut trips = self.trips.lock();
        if let Some(existing) = trips.iter_mut().find(|t| t.id == trip_id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    async fn delete_trip(&self, credential: &Credential, trip_id: i64) -> Result<(), ApiError> {
        self.record(format!("delete_trip:{trip_id}"));
        self.check(credential)?;
        self.trips.lock().retain(|t| t.id != trip_id);
        Ok(())
    }

    async fn list_itineraries(
        &self,
        credential: &Credential,
        trip_id: i64,
    ) -> Result<Vec<Itinerary>, ApiError> {
        self.record(format!("list_itineraries:{trip_id}"));
        self.check(credential)?;
        Ok(Vec::new())
    }

    async fn generate_itinerary(
        &self,
        credential: &Credential,
        trip_id: i64,
    ) -> Result<Itinerary, ApiError> {
        self.record(format!("generate_itinerary:{trip_id}"));
        self.check(credential)?;
        Ok(Itinerary {
            id: 500,
            trip_id,
            generated_at: Utc::now(),
            version: 7,
            plan: plan("Server Plan"),
            total_estimated_cost: None,
            total_estimated_duration_minutes: None,
        })
    }

    async fn get_itinerary(
        &self,
        credential: &Credential,
        itinerary_id: i64,
    ) -> Result<Itinerary, ApiError> {
        self.record(format!("get_itinerary:{itinerary_id}"));
        self.check(credential)?;
        Err(ApiError::Api {
            status: 404,
            message: "Itinerary not found".to_string(),
        })
    }

    async fn delete_itinerary(
        &self,
        credential: &Credential,
        itinerary_id: i64,
    ) -> Result<(), ApiError> {
        self.record(format!("delete_itinerary:{itinerary_id}"));
        self.check(credential)?;
        Ok(())
    }

    async fn generate_guest_itinerary(&self, draft: &TripDraft) -> Result<GeneratedPlan, ApiError> {
        self.record("generate_guest_itinerary");
        if self.guest_generation_fails_with_rate_limit {
            return Err(ApiError::RateLimited);
        }
        Ok(GeneratedPlan {
            plan: plan(&format!("{} Guest Plan", draft.city)),
            total_estimated_cost: Some(200.0),
            total_estimated_duration_minutes: None,
            generated_at: None,
        })
    }
}

async fn workflow_with(remote: Arc<FakeRemote>) -> TripWorkflow {
    let gateway: Arc<dyn RemoteTripGateway> = remote;
    let session = Arc::new(SessionStore::new(
        Arc::new(MemoryDurableStore::new()),
        Arc::new(MemoryVolatileStore::new()),
        Arc::new(RemoteIdentity(Arc::clone(&gateway))),
        Arc::new(RemoteGeneration(Arc::clone(&gateway))),
    ));
    session.initialize().await;
    TripWorkflow::new(session, gateway, GeoStrategy::ComponentMatch)
}

#[tokio::test]
async fn authenticated_create_list_delete_round_trip() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;

    workflow.sign_in("johndoe", "secret").await.unwrap();
    assert_eq!(workflow.session().mode(), SessionMode::Authenticated);

    let created = workflow
        .create_trip(draft("European Adventure"), None, None)
        .await
        .unwrap();
    assert_eq!(created.name, "European Adventure");
    assert_eq!(created.num_travelers, 2);

    // Exactly one create call, carrying the submitted fields.
    let creates: Vec<_> = remote
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("create_trip"))
        .collect();
    assert_eq!(creates, vec!["create_trip:European Adventure"]);

    let listed = workflow.list_trips().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    let calls_before_delete = remote.calls().len();
    workflow.delete_trip(created.id).await.unwrap();

    // One delete call and nothing else: the caller removes the trip from
    // its local list without a re-fetch.
    let calls = remote.calls();
    assert_eq!(calls.len(), calls_before_delete + 1);
    assert_eq!(calls.last().unwrap(), &format!("delete_trip:{}", created.id));
}

#[tokio::test]
async fn anonymous_operations_are_rejected_without_network() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;

    assert!(matches!(workflow.list_trips().await, Err(Error::NotAuthorized)));
    assert!(matches!(
        workflow.create_trip(draft("Nope"), None, None).await,
        Err(Error::NotAuthorized)
    ));
    assert!(matches!(
        workflow.generate_itinerary(1).await,
        Err(Error::NotAuthorized)
    ));
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn guest_operations_stay_local() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;

    let guest = workflow.continue_as_guest().await;
    assert_eq!(guest.username, "guest");

    let trip = workflow
        .create_trip(draft("Guest Getaway"), None, None)
        .await
        .unwrap();
    let listed = workflow.list_trips().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Guest Getaway");

    workflow.delete_trip(trip.id).await.unwrap();
    assert!(workflow.list_trips().await.unwrap().is_empty());

    // No remote traffic for any of it.
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn guest_generation_goes_through_unauthenticated_gateway() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;
    workflow.continue_as_guest().await;

    let trip = workflow
        .create_trip(draft("Guest Getaway"), None, None)
        .await
        .unwrap();
    let first = workflow.generate_itinerary(trip.id).await.unwrap();
    let second = workflow.generate_itinerary(trip.id).await.unwrap();

    // Client-side version assignment, newest first.
    assert_eq!((first.version, second.version), (1, 2));
    let stored = workflow.get_trip(trip.id).await.unwrap();
    let versions: Vec<u32> = stored.itineraries.iter().map(|i| i.version).collect();
    assert_eq!(versions, vec![2, 1]);
    assert_eq!(remote.calls(), vec!["generate_guest_itinerary"; 2]);
}

#[tokio::test]
async fn authenticated_generation_uses_server_version() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;
    workflow.sign_in("johndoe", "secret").await.unwrap();

    let trip = workflow
        .create_trip(draft("European Adventure"), None, None)
        .await
        .unwrap();
    let itinerary = workflow.generate_itinerary(trip.id).await.unwrap();

    assert_eq!(itinerary.version, 7);
    assert!(remote.calls().contains(&format!("generate_itinerary:{}", trip.id)));
}

#[tokio::test]
async fn rate_limited_guest_generation_gets_distinct_message() {
    let remote = Arc::new(FakeRemote {
        next_id: AtomicI64::new(1),
        guest_generation_fails_with_rate_limit: true,
        ..FakeRemote::default()
    });
    let workflow = workflow_with(Arc::clone(&remote)).await;
    workflow.continue_as_guest().await;

    let trip = workflow
        .create_trip(draft("Guest Getaway"), None, None)
        .await
        .unwrap();
    let err = workflow.generate_itinerary(trip.id).await.unwrap_err();

    assert_eq!(
        err.user_message(),
        "Itinerary generation is temporarily limited. Please try again in a few minutes."
    );
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_dispatch_on_both_paths() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;

    let mut bad = draft("Backwards");
    bad.start_date = NaiveDate::from_ymd_opt(2025, 9, 9).unwrap();

    workflow.continue_as_guest().await;
    assert!(matches!(
        workflow.create_trip(bad.clone(), None, None).await,
        Err(Error::Validation(_))
    ));
    assert!(workflow.list_trips().await.unwrap().is_empty());

    workflow.sign_in("johndoe", "secret").await.unwrap();
    assert!(matches!(
        workflow.create_trip(bad, None, None).await,
        Err(Error::Validation(_))
    ));
    assert!(!remote.calls().iter().any(|c| c.starts_with("create_trip")));
}

#[tokio::test]
async fn geo_mismatch_blocks_the_write() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;
    workflow.sign_in("johndoe", "secret").await.unwrap();

    let city = place("United States", "Dallas");
    let lodging = place("Canada", "Toronto");
    let err = workflow
        .create_trip(draft("Mismatch"), Some(&city), Some(&lodging))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Geo(_)));
    assert!(!remote.calls().iter().any(|c| c.starts_with("create_trip")));
}

#[tokio::test]
async fn lodging_without_city_place_cannot_be_verified() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;
    workflow.continue_as_guest().await;

    let lodging = place("United States", "Dallas");
    let err = workflow
        .create_trip(draft("Unverifiable"), None, Some(&lodging))
        .await
        .unwrap_err();

    assert_eq!(
        err.user_message(),
        "could not verify geographic data for the selected places"
    );
    assert!(workflow.list_trips().await.unwrap().is_empty());
}

#[tokio::test]
async fn guest_update_preserves_itineraries() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;
    workflow.continue_as_guest().await;

    let trip = workflow
        .create_trip(draft("Guest Getaway"), None, None)
        .await
        .unwrap();
    workflow.generate_itinerary(trip.id).await.unwrap();

    let mut renamed = draft("Renamed Getaway");
    renamed.num_travelers = 3;
    let updated = workflow
        .update_trip(trip.id, renamed, None, None)
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed Getaway");
    assert_eq!(updated.itineraries.len(), 1);
}

#[tokio::test]
async fn missing_guest_itinerary_is_not_a_missing_trip() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;
    workflow.continue_as_guest().await;

    let trip = workflow
        .create_trip(draft("Guest Getaway"), None, None)
        .await
        .unwrap();

    // The trip exists; only the itinerary is missing.
    let err = workflow.get_itinerary(trip.id, 999).await.unwrap_err();
    assert!(matches!(err, Error::ItineraryNotFound(999)));
    assert_eq!(err.user_message(), "That itinerary could not be found.");

    // An unknown trip still reports the trip.
    let err = workflow.get_itinerary(999, 1).await.unwrap_err();
    assert!(matches!(err, Error::TripNotFound(999)));
}

#[tokio::test]
async fn deleting_guest_itinerary_removes_exactly_that_one() {
    let remote = FakeRemote::new();
    let workflow = workflow_with(Arc::clone(&remote)).await;
    workflow.continue_as_guest().await;

    let trip = workflow
        .create_trip(draft("Guest Getaway"), None, None)
        .await
        .unwrap();
    let v1 = workflow.generate_itinerary(trip.id).await.unwrap();
    let v2 = workflow.generate_itinerary(trip.id).await.unwrap();

    workflow.delete_itinerary(trip.id, v1.id).await.unwrap();

    let remaining = workflow.list_itineraries(trip.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, v2.id);
    assert_eq!(remaining[0].version, 2);
}
