//! Meeting route error mapping.

use salvo::http::StatusError;
use tracing::error;

use slotmint_app::meetings::MeetingError;

pub(crate) fn into_status_error(error: MeetingError) -> StatusError {
    match error {
        MeetingError::Validation(source) => StatusError::bad_request().brief(source.to_string()),
        MeetingError::Auth => {
            error!("meeting provider rejected credentials");

            StatusError::bad_gateway().brief("Meeting provider authentication failed")
        }
        MeetingError::NotFound => StatusError::not_found().brief("Meeting not found"),
        MeetingError::RateLimited => {
            StatusError::too_many_requests().brief("Meeting provider rate limit exceeded")
        }
        MeetingError::Timeout => StatusError::gateway_timeout().brief("Meeting provider timeout"),
        MeetingError::Provider(detail) => {
            error!("meeting provider error: {detail}");

            StatusError::bad_gateway().brief("Meeting provider error")
        }
        MeetingError::Network(source) => {
            error!("meeting provider unreachable: {source}");

            StatusError::service_unavailable().brief("Meeting provider unavailable")
        }
    }
}
