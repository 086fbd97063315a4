//! Get Slot Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    slots::{errors::into_status_error, views::SlotView},
    state::State,
};

/// Slot Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlotResponse {
    /// The slot record
    pub slot: SlotView,
}

/// Get Slot Handler
///
/// Returns a slot by its ledger-assigned id.
#[endpoint(
    tags("slots"),
    summary = "Get Slot",
    responses(
        (status_code = StatusCode::OK, description = "Slot found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed slot id"),
        (status_code = StatusCode::NOT_FOUND, description = "Slot not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    slot_id: PathParam<u64>,
    depot: &mut Depot,
) -> Result<Json<SlotResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let slot = state
        .app
        .slots
        .get_slot(slot_id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(SlotResponse { slot: slot.into() }))
}
