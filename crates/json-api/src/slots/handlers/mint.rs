//! Mint Slot Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use slotmint_app::slots::{MintOutcome, MintRequest};

use crate::{extensions::*, slots::errors::into_status_error, state::State};

/// Mint Slot Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MintSlotRequest {
    /// Meeting topic
    pub topic: String,

    /// Slot date, `YYYY-MM-DD`
    pub date: String,

    /// Slot time, `HH:MM` (24-hour)
    pub time: String,

    /// Meeting duration in minutes
    pub duration: u32,

    /// Listed price as a decimal ETH string
    pub price: String,

    /// The minting party's wallet address
    pub account: String,
}

impl From<MintSlotRequest> for MintRequest {
    fn from(request: MintSlotRequest) -> Self {
        MintRequest {
            topic: request.topic,
            date: request.date,
            time: request.time,
            duration_minutes: request.duration,
            price: request.price,
            owner: request.account,
        }
    }
}

/// Mint Slot Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MintSlotResponse {
    /// Hash of the mint transaction
    pub tx_hash: String,

    /// Ledger-assigned slot id; null when the confirmation event was missing
    pub slot_id: Option<u64>,

    /// Block the mint was included in
    pub block_number: u64,

    /// Provider meeting id bound to the slot
    pub meeting_id: String,

    /// Join URL for participants
    pub join_url: String,

    /// Start URL for the host
    pub start_url: String,

    /// Scheduled start instant, ISO-8601
    pub start_time: String,

    /// Meeting topic
    pub topic: String,

    /// Slot date
    pub date: String,

    /// Slot time
    pub time: String,

    /// Meeting duration in minutes
    pub duration: u16,

    /// Listed price in ETH
    pub price: String,
}

impl From<MintOutcome> for MintSlotResponse {
    fn from(outcome: MintOutcome) -> Self {
        MintSlotResponse {
            tx_hash: outcome.tx_hash,
            slot_id: outcome.slot_id,
            block_number: outcome.block_number,
            meeting_id: outcome.meeting_id,
            join_url: outcome.join_url,
            start_url: outcome.start_url,
            start_time: outcome.start_time.to_string(),
            topic: outcome.topic,
            date: outcome.date.to_string(),
            time: outcome.time.to_string(),
            duration: outcome.duration_minutes,
            price: outcome.price.to_string(),
        }
    }
}

/// Mint Slot Handler
///
/// Creates the meeting, then mints the slot on the ledger.
#[endpoint(
    tags("slots"),
    summary = "Mint Slot",
    responses(
        (status_code = StatusCode::CREATED, description = "Slot minted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Meeting provider error"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Ledger unavailable"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Confirmation timeout"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<MintSlotRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MintSlotResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let outcome = state
        .app
        .slots
        .mint(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    // No Location header on a degraded success: without the confirmation
    // event there is no slot id to point at.
    if let Some(slot_id) = outcome.slot_id {
        res.add_header(LOCATION, format!("/slots/{slot_id}"), true)
            .or_500("failed to set location header")?;
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(outcome.into()))
}
