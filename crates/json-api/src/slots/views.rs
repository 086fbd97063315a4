//! Shared slot response shapes.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use slotmint::Slot;

/// A slot as the API renders it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SlotView {
    /// Ledger-assigned slot id
    pub slot_id: u64,

    /// Slot date, `YYYY-MM-DD`
    pub date: String,

    /// Slot time, `HH:MM`
    pub time: String,

    /// Listed price in ETH
    pub price: String,

    /// The minting party's address
    pub owner: String,

    /// The booking party's address, when booked
    pub booked_by: Option<String>,

    /// Whether the slot has been booked
    pub is_booked: bool,

    /// Whether escrowed funds have been released
    pub payment_released: bool,

    /// Provider meeting id bound to the slot
    pub meeting_id: String,

    /// Join URL for the bound meeting
    pub join_url: String,
}

impl From<Slot> for SlotView {
    fn from(slot: Slot) -> Self {
        SlotView {
            slot_id: slot.slot_id,
            date: slot.date.to_string(),
            time: slot.time.to_string(),
            price: slot.price.to_string(),
            owner: slot.owner.to_string(),
            booked_by: slot.booked_by.map(|address| address.to_string()),
            is_booked: slot.is_booked,
            payment_released: slot.payment_released,
            meeting_id: slot.meeting_id,
            join_url: slot.join_url,
        }
    }
}
