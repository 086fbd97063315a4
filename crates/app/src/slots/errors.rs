//! Slot lifecycle service errors.

use thiserror::Error;

use slotmint::ValidationError;

use crate::ledger::LedgerError;
use crate::meetings::MeetingError;

/// Errors from the mint, read, and book workflows.
///
/// Gateway errors are wrapped, not swallowed, with the workflow step they
/// occurred in; a revert during booking reads differently to the caller than
/// one during minting.
#[derive(Debug, Error)]
pub enum SlotsServiceError {
    /// Input rejected before any external call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No slot with the given id.
    #[error("slot not found")]
    NotFound,

    /// Advisory pre-check failure: the slot is already booked. The ledger's
    /// own atomic transition remains the final authority.
    #[error("slot is already booked")]
    AlreadyBooked,

    /// The slot exists but is not in a bookable state.
    #[error("invalid slot state: {0}")]
    InvalidState(String),

    /// The meeting provider failed during the mint workflow; nothing was
    /// minted.
    #[error("meeting provisioning failed during mint")]
    MeetingProvisioning(#[source] MeetingError),

    /// The ledger rejected or failed the mint transaction. The meeting
    /// already exists at this point (orphaned).
    #[error("ledger mint failed")]
    MintSubmission(#[source] LedgerError),

    /// The ledger rejected or failed the booking transaction; a revert here
    /// most often means another buyer won the race.
    #[error("ledger booking failed")]
    BookSubmission(#[source] LedgerError),

    /// A ledger read failed.
    #[error("ledger read failed")]
    LedgerRead(#[source] LedgerError),
}
