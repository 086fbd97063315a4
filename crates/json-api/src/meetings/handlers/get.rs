//! Get Meeting Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use slotmint_app::meetings::Meeting;

use crate::{extensions::*, meetings::errors::into_status_error, state::State};

/// Meeting Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MeetingResponse {
    /// Provider meeting id
    pub id: String,

    /// Meeting topic
    pub topic: String,

    /// Scheduled start instant, ISO-8601
    pub start_time: String,

    /// Duration in minutes
    pub duration: u16,

    /// Join URL for participants
    pub join_url: String,

    /// Start URL for the host
    pub start_url: String,
}

impl From<Meeting> for MeetingResponse {
    fn from(meeting: Meeting) -> Self {
        MeetingResponse {
            id: meeting.id,
            topic: meeting.topic,
            start_time: meeting.start_time.to_string(),
            duration: meeting.duration_minutes,
            join_url: meeting.join_url,
            start_url: meeting.start_url,
        }
    }
}

/// Get Meeting Handler
///
/// Returns a provider meeting record.
#[endpoint(
    tags("meetings"),
    summary = "Get Meeting",
    responses(
        (status_code = StatusCode::OK, description = "Meeting found"),
        (status_code = StatusCode::NOT_FOUND, description = "Meeting not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Meeting provider error"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    meeting_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MeetingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let meeting = state
        .app
        .meetings
        .fetch_meeting(&meeting_id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(meeting.into()))
}
