use serde::Deserialize;

/// One entry of a structured field-validation failure (HTTP 422).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `body.start_date`.
    pub location: String,
    pub message: String,
}

/// Errors produced by the remote trip API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No response or a transport-level failure ("server unreachable").
    #[error("http error: {0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    /// The response body did not decode as the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// 401: the credential is invalid or expired. Fatal to the
    /// authenticated session.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// 429 from the unauthenticated generation gateway.
    #[error("generation rate limit reached")]
    RateLimited,

    /// 422: structured per-field errors.
    #[error("{}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Any other non-success with a server-provided detail message
    /// (duplicate account, not found, forbidden, ...).
    #[error("{message}")]
    Api { status: u16, message: String },
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.location, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

// FastAPI error body: `detail` is either a plain string or a list of
// `{loc: [..], msg: ..}` entries for 422s.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Fields(Vec<RawFieldError>),
}

#[derive(Debug, Deserialize)]
struct RawFieldError {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

/// Map a non-success status and its body to a structured [`Error`]. The
/// server-provided detail is preserved when present; a missing or malformed
/// body falls back to a generic message for the status.
pub(crate) fn decode_failure(status: u16, body: &str) -> Error {
    if status == 429 {
        return Error::RateLimited;
    }

    let detail = serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.detail);

    match (status, detail) {
        (401, detail) => Error::Unauthorized(match detail {
            Some(ErrorDetail::Message(msg)) => msg,
            _ => "credential rejected".to_string(),
        }),
        (_, Some(ErrorDetail::Fields(fields))) => Error::Validation(
            fields
                .into_iter()
                .map(|f| FieldError {
                    location: f
                        .loc
                        .iter()
                        .map(|part| match part {
                            serde_json::Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join("."),
                    message: f.msg,
                })
                .collect(),
        ),
        (status, Some(ErrorDetail::Message(msg))) => Error::Api { status, message: msg },
        (status, None) => Error::Api {
            status,
            message: format!("request failed with status {status}"),
        },
    }
}
