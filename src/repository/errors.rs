use thiserror::Error;

/// Failures reported by the catalog backend or the transport talking to it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Non-success status that is not a uniqueness conflict.
    #[error("backend responded with status {status}: {message}")]
    Status { status: u16, message: String },
    /// Uniqueness or scoping violation rejected by the backend.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Connection-level failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body could not be decoded into taxonomy records.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// A record decoded but broke a value constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Phrases some backends put in a body when the route itself is unknown.
const MISSING_ROUTE_PHRASES: &[&str] = &["not found", "cannot get", "no route", "does not exist"];

impl RepositoryError {
    /// Whether the error means the requested route is absent on this
    /// deployment.
    ///
    /// A 404 status is the primary signal. Message matching is best effort
    /// only and may stop working if the backend rewords its errors.
    pub fn is_route_missing(&self) -> bool {
        match self {
            Self::Status { status: 404, .. } => true,
            Self::Status { status, message } if *status >= 400 => {
                let message = message.to_lowercase();
                MISSING_ROUTE_PHRASES
                    .iter()
                    .any(|phrase| message.contains(phrase))
            }
            _ => false,
        }
    }
}

/// Convenient alias for results returned from repository calls.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
