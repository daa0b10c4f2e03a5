use wayfare_model::{GeoError, ValidationError};
use wayfare_session::GatewayError;

/// Anything a trip/itinerary operation can fail with. Converted to a
/// user-displayable string at the UI boundary via
/// [`user_message`](Error::user_message); never propagated as a panic.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The session is Anonymous; no data operation was attempted.
    #[error("not authorized")]
    NotAuthorized,

    #[error("trip not found: {0}")]
    TripNotFound(i64),

    #[error("itinerary not found: {0}")]
    ItineraryNotFound(i64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Api(#[from] wayfare_api::Error),

    #[error(transparent)]
    Session(#[from] wayfare_session::Error),
}

impl Error {
    /// The message shown to the user. Client-detected validation and geo
    /// errors surface verbatim; server field errors arrive pre-joined;
    /// transport failures collapse to one generic message.
    pub fn user_message(&self) -> String {
        match self {
            Error::NotAuthorized => "You must be signed in to manage trips.".to_string(),
            Error::TripNotFound(_) => "That trip could not be found.".to_string(),
            Error::ItineraryNotFound(_) => "That itinerary could not be found.".to_string(),
            Error::Validation(err) => err.to_string(),
            Error::Geo(err) => err.to_string(),
            Error::Api(err) => api_message(err),
            Error::Session(wayfare_session::Error::TripNotFound(_)) => {
                "That trip could not be found.".to_string()
            }
            Error::Session(wayfare_session::Error::Login(err)) => match err {
                GatewayError::Unavailable(_) => SERVER_UNREACHABLE.to_string(),
                other => format!("Sign-in failed: {other}"),
            },
            Error::Session(wayfare_session::Error::Generation(err)) => match err {
                GatewayError::RateLimited => RATE_LIMITED.to_string(),
                GatewayError::Unavailable(_) => SERVER_UNREACHABLE.to_string(),
                GatewayError::Rejected(msg) => format!("Itinerary generation failed: {msg}"),
            },
        }
    }
}

const SERVER_UNREACHABLE: &str = "The server could not be reached. Please try again.";
const RATE_LIMITED: &str =
    "Itinerary generation is temporarily limited. Please try again in a few minutes.";

fn api_message(err: &wayfare_api::Error) -> String {
    match err {
        wayfare_api::Error::Http(_) | wayfare_api::Error::Json(_) => {
            SERVER_UNREACHABLE.to_string()
        }
        wayfare_api::Error::RateLimited => RATE_LIMITED.to_string(),
        wayfare_api::Error::Unauthorized(_) => {
            "Your session has expired. Please sign in again.".to_string()
        }
        // Validation joins its field errors; Api carries the server detail.
        other => other.to_string(),
    }
}
