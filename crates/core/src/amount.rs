//! ETH amounts with exact wei conversion.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wei per ETH.
const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Errors from parsing a decimal ETH amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Input is not a decimal number.
    #[error("not a decimal number")]
    NotDecimal,

    /// Amounts cannot be negative anywhere in this domain.
    #[error("amount cannot be negative")]
    Negative,

    /// More than 18 fractional digits cannot be represented in wei.
    #[error("more than 18 decimal places")]
    TooPrecise,

    /// The amount does not fit the wei range.
    #[error("amount out of range")]
    OutOfRange,
}

/// A non-negative ETH amount, held in wei for exact arithmetic.
///
/// Parsed from and displayed as a decimal ETH string, the unit callers deal
/// in; the wei form is what the ledger transacts in. The conversion is exact
/// in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EthAmount {
    wei: u128,
}

impl EthAmount {
    /// Zero ETH.
    pub const ZERO: Self = Self { wei: 0 };

    /// Wrap a raw wei quantity.
    #[must_use]
    pub const fn from_wei(wei: u128) -> Self {
        Self { wei }
    }

    /// The amount in wei.
    #[must_use]
    pub const fn to_wei(self) -> u128 {
        self.wei
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.wei == 0
    }

    /// Parse a decimal ETH string such as `"0.01"`.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] for non-decimal input, negative values,
    /// more than 18 fractional digits, or values outside the wei range.
    pub fn parse(value: &str) -> Result<Self, AmountError> {
        let decimal = Decimal::from_str(value.trim()).map_err(|_source| AmountError::NotDecimal)?;

        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(AmountError::Negative);
        }

        let normalized = decimal.normalize();
        let scale = normalized.scale();

        if scale > 18 {
            return Err(AmountError::TooPrecise);
        }

        let mantissa = u128::try_from(normalized.mantissa().abs())
            .map_err(|_source| AmountError::OutOfRange)?;

        let factor = 10_u128.pow(18 - scale);
        let wei = mantissa
            .checked_mul(factor)
            .ok_or(AmountError::OutOfRange)?;

        Ok(Self { wei })
    }
}

impl FromStr for EthAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EthAmount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EthAmount> for String {
    fn from(value: EthAmount) -> Self {
        value.to_string()
    }
}

impl Display for EthAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let whole = self.wei / WEI_PER_ETH;
        let frac = self.wei % WEI_PER_ETH;

        if frac == 0 {
            return write!(f, "{whole}");
        }

        let frac = format!("{frac:018}");
        let frac = frac.trim_end_matches('0');

        write!(f, "{whole}.{frac}")
    }
}
