/// Failure reported by a gateway the session layer calls out through.
///
/// The session layer never sees HTTP; the workflow's adapters collapse the
/// API error taxonomy into these three cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The unauthenticated generation gateway refused for rate limiting.
    #[error("generation rate limit reached")]
    RateLimited,

    /// The server answered and said no (invalid credential, bad input, ...).
    #[error("{0}")]
    Rejected(String),

    /// No usable response (transport failure, malformed body).
    #[error("server unreachable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("trip not found: {0}")]
    TripNotFound(i64),

    /// The credential could not be resolved to a profile. The credential has
    /// already been discarded by the time this is returned.
    #[error("login failed: {0}")]
    Login(GatewayError),

    #[error("itinerary generation failed: {0}")]
    Generation(GatewayError),
}

pub type Result<T> = std::result::Result<T, Error>;
