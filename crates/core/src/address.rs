//! Chain address syntax.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A ledger account address: `0x` followed by 40 hex digits.
///
/// Stored lowercased so equality is case-insensitive over the hex payload.
/// The all-zero address is constructible on purpose: the ledger returns it as
/// the owner of records that were never minted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainAddress(String);

impl ChainAddress {
    /// The all-zero address the ledger uses for absent records.
    #[must_use]
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(40)))
    }

    /// Parse an address, rejecting anything that is not `0x` + 40 hex digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] on malformed input.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let hex = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .ok_or(ValidationError::InvalidAddress)?;

        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidAddress);
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// Whether this is the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.chars().skip(2).all(|c| c == '0')
    }

    /// The lowercased `0x`-prefixed form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChainAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ChainAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ChainAddress> for String {
    fn from(value: ChainAddress) -> Self {
        value.0
    }
}

impl Display for ChainAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}
