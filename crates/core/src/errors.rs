//! Domain validation errors.

use thiserror::Error;

/// Rejection of caller-supplied input, raised before any external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Topic is empty or longer than 200 characters after trimming.
    #[error("topic must be between 1 and 200 characters")]
    TopicLength,

    /// Date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date format, use YYYY-MM-DD")]
    InvalidDate,

    /// Time is not a valid 24-hour `HH:MM` clock time.
    #[error("invalid time format, use HH:MM (24-hour)")]
    InvalidTime,

    /// Duration is outside 1 to 1440 minutes.
    #[error("duration must be between 1 and 1440 minutes")]
    InvalidDuration,

    /// Price is not a parseable decimal ETH amount.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Price must be strictly positive for a listing.
    #[error("price must be a positive amount")]
    NonPositivePrice,

    /// Address is not `0x` followed by 40 hex digits.
    #[error("invalid wallet address format")]
    InvalidAddress,

    /// The slot's start instant is not in the future.
    #[error("cannot create a meeting in the past")]
    StartNotInFuture,

    /// Slot or booking identifier is empty.
    #[error("identifier is required")]
    EmptyIdentifier,

    /// All-digit identifier does not fit a slot id.
    #[error("slot id out of range")]
    SlotIdOutOfRange,
}
