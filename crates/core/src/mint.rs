//! Mint input validation.

use jiff::Timestamp;

use crate::address::ChainAddress;
use crate::amount::EthAmount;
use crate::errors::ValidationError;
use crate::schedule::{SlotDate, SlotTime};

/// A fully validated request to mint a slot.
///
/// Construction performs every check that can run without leaving the
/// process, so a failed parse guarantees no meeting was created and no
/// transaction submitted. The future-instant check needs the caller's clock
/// and runs separately via [`MintInput::start_in_future`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintInput {
    /// Meeting topic, trimmed, 1 to 200 characters.
    pub topic: String,

    /// Slot date.
    pub date: SlotDate,

    /// Slot time.
    pub time: SlotTime,

    /// Meeting duration in minutes, 1 to 1440.
    pub duration_minutes: u16,

    /// Listed price, strictly positive.
    pub price: EthAmount,

    /// The minting party's address.
    pub owner: ChainAddress,
}

impl MintInput {
    /// Validate raw mint parameters.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first failing field.
    pub fn parse(
        topic: &str,
        date: &str,
        time: &str,
        duration_minutes: u32,
        price: &str,
        owner: &str,
    ) -> Result<Self, ValidationError> {
        let topic = topic.trim();

        if topic.is_empty() || topic.chars().count() > 200 {
            return Err(ValidationError::TopicLength);
        }

        let date = SlotDate::parse(date)?;
        let time = SlotTime::parse(time)?;

        if !(1..=1440).contains(&duration_minutes) {
            return Err(ValidationError::InvalidDuration);
        }

        let duration_minutes =
            u16::try_from(duration_minutes).map_err(|_source| ValidationError::InvalidDuration)?;

        let price = EthAmount::parse(price)
            .map_err(|source| ValidationError::InvalidPrice(source.to_string()))?;

        if price.is_zero() {
            return Err(ValidationError::NonPositivePrice);
        }

        let owner = ChainAddress::parse(owner)?;

        Ok(Self {
            topic: topic.to_owned(),
            date,
            time,
            duration_minutes,
            price,
            owner,
        })
    }

    /// The slot's start instant, required to be strictly after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::StartNotInFuture`] when the slot starts at
    /// or before `now`.
    pub fn start_in_future(&self, now: Timestamp) -> Result<Timestamp, ValidationError> {
        let start = self.date.start_instant(self.time)?;

        if start <= now {
            return Err(ValidationError::StartNotInFuture);
        }

        Ok(start)
    }
}
