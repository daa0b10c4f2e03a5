//! Wire shapes that differ from the canonical model.
//!
//! Most payloads deserialize straight into `wayfare-model` types (the field
//! names mirror the backend's JSON); only the shapes that carry
//! backend-specific fields live here.

use serde::{Deserialize, Serialize};
use wayfare_model::{Trip, TripOwner};

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// `POST /auth/login` response. Extra token metadata is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenOut {
    pub access_token: String,
}

/// A trip as the backend returns it: owner as a `user_id` column, no
/// embedded itineraries (those are fetched per trip).
#[derive(Debug, Deserialize)]
pub(crate) struct TripOut {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub city: String,
    pub stay_address: Option<String>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub num_travelers: u32,
    pub budget_per_person: Option<f64>,
    #[serde(default)]
    pub activity_preferences: Option<Vec<String>>,
}

impl From<TripOut> for Trip {
    fn from(out: TripOut) -> Self {
        Trip {
            id: out.id,
            owner: TripOwner::User { id: out.user_id },
            name: out.name,
            city: out.city,
            stay_address: out.stay_address,
            start_date: out.start_date,
            end_date: out.end_date,
            num_travelers: out.num_travelers,
            budget_per_person: out.budget_per_person,
            activity_preferences: out.activity_preferences.unwrap_or_default(),
            itineraries: Vec::new(),
        }
    }
}
