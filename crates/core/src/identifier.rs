//! The slot / booking-key identifier union.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// The two keys a slot is addressable by: the numeric id known to the minter,
/// or the opaque booking key issued to the buyer.
///
/// The parse rule is unambiguous: an all-digit string is a slot id, anything
/// else is a booking key. Booking keys that merely *coerce* to digits (padded
/// or `+`-signed forms) are not folded in here; the ledger gateway retries
/// those explicitly after a failed key lookup, via [`SlotRef::fallback_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotRef {
    /// A ledger-assigned numeric slot id.
    Id(u64),

    /// An opaque booking key.
    Key(String),
}

impl SlotRef {
    /// Parse an identifier: all digits means a slot id, anything else a key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for blank input and
    /// [`ValidationError::SlotIdOutOfRange`] for an all-digit string too
    /// large for a slot id.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();

        if value.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }

        if value.chars().all(|c| c.is_ascii_digit()) {
            return value
                .parse()
                .map(Self::Id)
                .map_err(|_source| ValidationError::SlotIdOutOfRange);
        }

        Ok(Self::Key(value.to_owned()))
    }

    /// The numeric reading of a booking key, for the gateway's second lookup
    /// attempt after a key lookup misses. `None` for ids (no retry needed)
    /// and for keys with no digits-only reading.
    #[must_use]
    pub fn fallback_id(&self) -> Option<u64> {
        match self {
            Self::Id(_) => None,
            Self::Key(key) => {
                let digits = key.trim().trim_start_matches('+');

                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }

                digits.parse().ok()
            }
        }
    }
}

impl FromStr for SlotRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SlotRef {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SlotRef> for String {
    fn from(value: SlotRef) -> Self {
        value.to_string()
    }
}

impl From<u64> for SlotRef {
    fn from(value: u64) -> Self {
        Self::Id(value)
    }
}

impl Display for SlotRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Id(id) => Display::fmt(id, f),
            Self::Key(key) => Display::fmt(key, f),
        }
    }
}
