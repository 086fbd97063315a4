//! Verification service errors.

use thiserror::Error;

use slotmint::ValidationError;

use crate::ledger::LedgerError;

/// Errors from resolving a booking key or slot id to meeting access.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// Identifier rejected before any external call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No booked slot behind the identifier. An unbooked slot resolves here
    /// too: it exists, but there is no booking to verify.
    #[error("invalid booking key or slot not booked")]
    NotFound,

    /// A ledger read failed.
    #[error("ledger read failed")]
    LedgerRead(#[source] LedgerError),
}
