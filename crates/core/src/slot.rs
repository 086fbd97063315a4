//! The canonical slot record.

use serde::{Deserialize, Serialize};

use crate::address::ChainAddress;
use crate::amount::EthAmount;
use crate::schedule::{SlotDate, SlotTime};

/// A bookable time slot as the ledger tracks it.
///
/// The ledger owns the authoritative copy; this is the normalized projection
/// every read path returns. `booked_by` is `Some` exactly when `is_booked`
/// holds, which the gateway's normalization guarantees by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Ledger-assigned identifier, unique and immutable.
    pub slot_id: u64,

    /// Calendar date of the slot.
    pub date: SlotDate,

    /// Clock time of the slot.
    pub time: SlotTime,

    /// Listed price, fixed at mint.
    pub price: EthAmount,

    /// The minting party.
    pub owner: ChainAddress,

    /// The booking party, set by the first successful booking.
    pub booked_by: Option<ChainAddress>,

    /// Whether the slot has been booked. Transitions false to true at most
    /// once and never back.
    pub is_booked: bool,

    /// Whether escrowed funds have been released to the owner.
    pub payment_released: bool,

    /// The meeting bound to this slot at mint time.
    pub meeting_id: String,

    /// Join URL for the bound meeting.
    pub join_url: String,
}

impl Slot {
    /// Whether the booked flag and the booking party agree.
    #[must_use]
    pub fn booking_consistent(&self) -> bool {
        self.is_booked == self.booked_by.is_some()
    }
}
