//! Client-side field validation, run before any write is dispatched to
//! either store.

use crate::types::TripDraft;

/// A draft rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("start date must be on or before end date")]
    DateOrder,

    #[error("at least one traveler is required")]
    TravelerCount,

    #[error("budget per person cannot be negative")]
    NegativeBudget,
}

/// Check the submitted trip fields: required fields non-empty,
/// `start_date <= end_date`, `num_travelers >= 1`, budget non-negative.
pub fn validate_draft(draft: &TripDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::MissingField("trip name"));
    }
    if draft.city.trim().is_empty() {
        return Err(ValidationError::MissingField("city"));
    }
    if draft.start_date > draft.end_date {
        return Err(ValidationError::DateOrder);
    }
    if draft.num_travelers < 1 {
        return Err(ValidationError::TravelerCount);
    }
    if let Some(budget) = draft.budget_per_person
        && budget < 0.0
    {
        return Err(ValidationError::NegativeBudget);
    }
    Ok(())
}
