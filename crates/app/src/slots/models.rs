//! Slot lifecycle models.

use jiff::Timestamp;

use slotmint::{EthAmount, Slot, SlotDate, SlotTime};

/// Raw mint parameters as the caller supplies them.
///
/// Validation happens inside the service so a rejected request provably
/// touches no external system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// Meeting topic.
    pub topic: String,

    /// Slot date, `YYYY-MM-DD`.
    pub date: String,

    /// Slot time, `HH:MM`.
    pub time: String,

    /// Meeting duration in minutes.
    pub duration_minutes: u32,

    /// Listed price as a decimal ETH string.
    pub price: String,

    /// The minting party's address.
    pub owner: String,
}

/// Combined result of a mint: the ledger receipt plus the meeting binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintOutcome {
    /// Hash of the mint transaction.
    pub tx_hash: String,

    /// Ledger-assigned slot id; `None` when the confirmation event was
    /// missing despite a successful transaction.
    pub slot_id: Option<u64>,

    /// Block the mint was included in.
    pub block_number: u64,

    /// Provider meeting id bound to the slot.
    pub meeting_id: String,

    /// Join URL for participants.
    pub join_url: String,

    /// Start URL for the host.
    pub start_url: String,

    /// Scheduled start instant.
    pub start_time: Timestamp,

    /// Echo of the validated topic.
    pub topic: String,

    /// Echo of the validated date.
    pub date: SlotDate,

    /// Echo of the validated time.
    pub time: SlotTime,

    /// Echo of the validated duration.
    pub duration_minutes: u16,

    /// Echo of the validated price.
    pub price: EthAmount,
}

/// Raw booking parameters as the caller supplies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRequest {
    /// The slot to book.
    pub slot_id: u64,

    /// The buyer's address.
    pub buyer_address: String,
}

/// Result of a booking: the receipt merged with the pre-fetched slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookOutcome {
    /// Hash of the booking transaction.
    pub tx_hash: String,

    /// Booking key from the confirmation event; `None` when the event was
    /// missing.
    pub booking_key: Option<String>,

    /// Block the booking was included in.
    pub block_number: u64,

    /// The slot as read before submission, with the authoritative price.
    pub slot: Slot,
}
