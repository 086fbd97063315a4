//! Meeting gateway errors.

use thiserror::Error;

use slotmint::ValidationError;

/// Errors from the meeting provider gateway.
#[derive(Debug, Error)]
pub enum MeetingError {
    /// Input rejected before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider rejected our credentials or token.
    #[error("meeting provider rejected the credentials")]
    Auth,

    /// The provider has no meeting with the given id.
    #[error("meeting not found")]
    NotFound,

    /// The provider throttled us; retry after backoff.
    #[error("meeting provider rate limit exceeded")]
    RateLimited,

    /// The request exceeded its deadline.
    #[error("meeting provider request timed out")]
    Timeout,

    /// The provider answered with an unexpected status or body.
    #[error("meeting provider error: {0}")]
    Provider(String),

    /// Transport-level failure reaching the provider.
    #[error("failed to reach meeting provider")]
    Network(#[source] reqwest::Error),
}

impl MeetingError {
    /// Classify a transport error, separating timeouts from connectivity.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }

        Self::Network(error)
    }
}
