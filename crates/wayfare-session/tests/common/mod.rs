#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use wayfare_model::{
    Credential, DailyPlan, GeneratedPlan, ItineraryPlan, TripDraft, UserProfile,
};
use wayfare_session::{GatewayError, GenerationGateway, IdentityGateway};

/// Accepts exactly one token; everything else is rejected.
pub struct FakeIdentity {
    pub valid_token: String,
}

#[async_trait]
impl IdentityGateway for FakeIdentity {
    async fn resolve_profile(&self, credential: &Credential) -> Result<UserProfile, GatewayError> {
        if credential.as_str() == self.valid_token {
            Ok(UserProfile {
                id: 42,
                username: "johndoe".to_string(),
                email: "john.doe@example.com".to_string(),
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
            })
        } else {
            Err(GatewayError::Rejected("Could not validate credentials".to_string()))
        }
    }
}

/// Returns a fresh canned plan per call, or a fixed error when set.
pub struct FakeGeneration {
    pub calls: AtomicUsize,
    pub fail_with: Option<GatewayError>,
}

impl FakeGeneration {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: None,
        })
    }

    pub fn failing(err: GatewayError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: Some(err),
        })
    }
}

#[async_trait]
impl GenerationGateway for FakeGeneration {
    async fn generate(&self, draft: &TripDraft) -> Result<GeneratedPlan, GatewayError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(GeneratedPlan {
            plan: ItineraryPlan {
                title: format!("{} plan #{call}", draft.city),
                duration_days: 1,
                daily_plans: vec![DailyPlan {
                    day_number: 1,
                    day_date: draft.start_date,
                    theme: None,
                    activities: Vec::new(),
                }],
                notes: None,
            },
            total_estimated_cost: Some(120.0),
            total_estimated_duration_minutes: Some(300),
            generated_at: None,
        })
    }
}

pub fn draft(name: &str, city: &str) -> TripDraft {
    TripDraft {
        name: name.to_string(),
        city: city.to_string(),
        stay_address: None,
        start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
        num_travelers: 2,
        budget_per_person: None,
        activity_preferences: vec!["museums".to_string()],
    }
}
