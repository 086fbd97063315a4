//! Ledger gateway seam.

use async_trait::async_trait;
use mockall::automock;

use slotmint::{ChainAddress, EthAmount, Slot, SlotDate, SlotRef, SlotTime};

use crate::ledger::errors::LedgerError;

/// Parameters for minting a slot on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintSubmission {
    /// Slot calendar date.
    pub date: SlotDate,

    /// Slot clock time.
    pub time: SlotTime,

    /// Listed price.
    pub price: EthAmount,

    /// The minting party.
    pub owner: ChainAddress,

    /// The meeting bound to the slot.
    pub meeting_id: String,

    /// Join URL for the bound meeting.
    pub join_url: String,
}

/// Result of a confirmed mint transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    /// Hash of the included transaction.
    pub tx_hash: String,

    /// The ledger-assigned slot id, when the confirmation event was present.
    /// `None` is a degraded success: the mint happened on-chain but the
    /// `SlotMinted` event was missing from the receipt.
    pub slot_id: Option<u64>,

    /// Block the transaction was included in.
    pub block_number: u64,
}

/// Parameters for booking a slot on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSubmission {
    /// The slot to book.
    pub slot_id: u64,

    /// The booking party.
    pub buyer: ChainAddress,

    /// The listed price, transferred as payment with the transaction.
    pub price: EthAmount,
}

/// Result of a confirmed booking transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    /// Hash of the included transaction.
    pub tx_hash: String,

    /// The booking key from the `SlotBooked` event, when present.
    pub booking_key: Option<String>,

    /// Block the transaction was included in.
    pub block_number: u64,

    /// The booked slot id.
    pub slot_id: u64,
}

/// Typed operations on the on-chain slot contract.
///
/// Reads return `Ok(None)` for slots the ledger does not know — including
/// the zero-valued records it hands back for ids that were never minted.
/// Submissions estimate cost and fail fast on an underfunded signer before
/// anything reaches the chain.
#[automock]
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Submit a mint transaction and wait for its confirmation.
    async fn mint_slot(&self, submission: MintSubmission) -> Result<MintReceipt, LedgerError>;

    /// Look up a slot by id or booking key.
    async fn slot_info(&self, reference: &SlotRef) -> Result<Option<Slot>, LedgerError>;

    /// The listed price of a slot, from the dedicated accessor with a
    /// fallback to the full record.
    async fn slot_price(&self, slot_id: u64) -> Result<EthAmount, LedgerError>;

    /// Submit a booking transaction, paying the slot price, and wait for its
    /// confirmation.
    async fn book_slot(&self, submission: BookSubmission) -> Result<BookingReceipt, LedgerError>;
}
