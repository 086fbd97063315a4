//! Verify Booking Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use slotmint::SlotRef;
use slotmint_app::verification::BookingAccess;

use crate::{
    extensions::*,
    slots::errors::verification_into_status_error,
    state::State,
};

/// Verify Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyBookingRequest {
    /// The booking key issued at booking time
    pub booking_key: String,
}

/// Verify Booking Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyBookingResponse {
    /// Join URL for the bound meeting
    pub join_url: String,

    /// Start instant of the slot, ISO-8601
    pub start_time: String,

    /// Meeting topic, when the provider still has the record
    pub topic: Option<String>,

    /// Provider meeting id
    pub meeting_id: String,

    /// Slot date
    pub date: String,

    /// Slot time
    pub time: String,
}

impl From<BookingAccess> for VerifyBookingResponse {
    fn from(access: BookingAccess) -> Self {
        VerifyBookingResponse {
            join_url: access.join_url,
            start_time: access.start_time.to_string(),
            topic: access.topic,
            meeting_id: access.meeting_id,
            date: access.date.to_string(),
            time: access.time.to_string(),
        }
    }
}

/// Verify Booking Handler
///
/// Resolves a booking key to meeting access details.
#[endpoint(
    tags("slots"),
    summary = "Verify Booking",
    responses(
        (status_code = StatusCode::OK, description = "Booking verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid booking key or slot not booked"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyBookingRequest>,
    depot: &mut Depot,
) -> Result<Json<VerifyBookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reference = SlotRef::parse(&json.into_inner().booking_key)
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let access = state
        .app
        .verification
        .verify(&reference)
        .await
        .map_err(verification_into_status_error)?;

    Ok(Json(access.into()))
}
