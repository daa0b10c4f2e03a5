use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque bearer token proving an authenticated identity to the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Public profile of the signed-in (or placeholder guest) user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A place record resolved from the external autocomplete widget.
///
/// `place_id` is empty and the coordinates are `None` when the value was
/// inferred from a stored string without re-resolution (e.g. a trip loaded
/// from the remote store where only its city name is known at edit time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaceGeoData {
    pub place_id: String,
    pub name: String,
    pub country: String,
    pub locality: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl PlaceGeoData {
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}

/// Who a trip belongs to. Tagged at the storage boundary only; remote and
/// guest id spaces are never compared or merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TripOwner {
    User { id: i64 },
    Guest,
}

/// A planned trip, with its generated itineraries ordered newest version
/// first. Invariant: `start_date <= end_date` (enforced by
/// [`validate_draft`](crate::validate::validate_draft) before any write).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub owner: TripOwner,
    pub name: String,
    pub city: String,
    pub stay_address: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_travelers: u32,
    pub budget_per_person: Option<f64>,
    #[serde(default)]
    pub activity_preferences: Vec<String>,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

impl Trip {
    /// Highest itinerary version present, or 0 for a trip with none.
    pub fn max_itinerary_version(&self) -> u32 {
        self.itineraries.iter().map(|i| i.version).max().unwrap_or(0)
    }

    /// Build a trip from submitted fields. Itineraries start empty.
    pub fn from_draft(id: i64, owner: TripOwner, draft: TripDraft) -> Self {
        Self {
            id,
            owner,
            name: draft.name,
            city: draft.city,
            stay_address: draft.stay_address,
            start_date: draft.start_date,
            end_date: draft.end_date,
            num_travelers: draft.num_travelers,
            budget_per_person: draft.budget_per_person,
            activity_preferences: draft.activity_preferences,
            itineraries: Vec::new(),
        }
    }
}

/// The mutable-field subset of a trip, submitted on create and update.
/// Serializes to the remote API's create/update payload as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    pub name: String,
    pub city: String,
    pub stay_address: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_travelers: u32,
    pub budget_per_person: Option<f64>,
    #[serde(default)]
    pub activity_preferences: Vec<String>,
}

impl From<&Trip> for TripDraft {
    fn from(trip: &Trip) -> Self {
        Self {
            name: trip.name.clone(),
            city: trip.city.clone(),
            stay_address: trip.stay_address.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            num_travelers: trip.num_travelers,
            budget_per_person: trip.budget_per_person,
            activity_preferences: trip.activity_preferences.clone(),
        }
    }
}

/// A generated itinerary. Immutable once created; deletable, never edited.
///
/// `version` is strictly increasing per trip: server-assigned for
/// authenticated trips, assigned by the guest store for guest trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: i64,
    pub trip_id: i64,
    pub generated_at: DateTime<Utc>,
    pub version: u32,
    #[serde(rename = "plan_data")]
    pub plan: ItineraryPlan,
    pub total_estimated_cost: Option<f64>,
    pub total_estimated_duration_minutes: Option<u32>,
}

/// The full structured content of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryPlan {
    pub title: String,
    pub duration_days: u32,
    pub daily_plans: Vec<DailyPlan>,
    pub notes: Option<String>,
}

/// The plan for a single day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub day_number: u32,
    pub day_date: NaiveDate,
    pub theme: Option<String>,
    pub activities: Vec<Activity>,
}

/// A single activity within a daily plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub estimated_duration_minutes: Option<u32>,
    pub transportation: Option<String>,
    pub cost_usd: Option<f64>,
}

/// A generation result not yet bound to a trip: no id and no version.
///
/// This is what the unauthenticated guest generation gateway returns; the
/// guest store assigns the version because the gateway is stateless per call
/// and cannot track a guest's itinerary history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    #[serde(rename = "plan_data")]
    pub plan: ItineraryPlan,
    pub total_estimated_cost: Option<f64>,
    pub total_estimated_duration_minutes: Option<u32>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}
