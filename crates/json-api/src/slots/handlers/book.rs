//! Book Slot Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use slotmint_app::slots::{BookOutcome, BookRequest};

use crate::{
    extensions::*,
    slots::{errors::into_status_error, views::SlotView},
    state::State,
};

/// Book Slot Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookSlotRequest {
    /// The slot to book
    pub slot_id: u64,

    /// The buyer's wallet address
    pub buyer_address: String,
}

impl From<BookSlotRequest> for BookRequest {
    fn from(request: BookSlotRequest) -> Self {
        BookRequest {
            slot_id: request.slot_id,
            buyer_address: request.buyer_address,
        }
    }
}

/// Book Slot Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookSlotResponse {
    /// Hash of the booking transaction
    pub tx_hash: String,

    /// Booking key from the confirmation event; null when the event was
    /// missing
    pub booking_key: Option<String>,

    /// Block the booking was included in
    pub block_number: u64,

    /// The booked slot
    pub slot_info: SlotView,
}

impl From<BookOutcome> for BookSlotResponse {
    fn from(outcome: BookOutcome) -> Self {
        BookSlotResponse {
            tx_hash: outcome.tx_hash,
            booking_key: outcome.booking_key,
            block_number: outcome.block_number,
            slot_info: outcome.slot.into(),
        }
    }
}

/// Book Slot Handler
///
/// Pays the listed price to book a slot.
#[endpoint(
    tags("slots"),
    summary = "Book Slot",
    responses(
        (status_code = StatusCode::OK, description = "Slot booked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Already booked or invalid input"),
        (status_code = StatusCode::NOT_FOUND, description = "Slot not found"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Ledger unavailable"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Confirmation timeout"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BookSlotRequest>,
    depot: &mut Depot,
) -> Result<Json<BookSlotResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let outcome = state
        .app
        .slots
        .book(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}
