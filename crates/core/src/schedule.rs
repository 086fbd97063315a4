//! Slot calendar dates and clock times.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A slot's calendar date in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotDate(Date);

impl SlotDate {
    /// Parse a `YYYY-MM-DD` string into a real calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] on the wrong shape or an
    /// impossible date such as `2023-02-30`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let mut parts = value.split('-');

        let year = take_digits(parts.next(), 4).ok_or(ValidationError::InvalidDate)?;
        let month = take_digits(parts.next(), 2).ok_or(ValidationError::InvalidDate)?;
        let day = take_digits(parts.next(), 2).ok_or(ValidationError::InvalidDate)?;

        if parts.next().is_some() {
            return Err(ValidationError::InvalidDate);
        }

        let year = i16::try_from(year).map_err(|_source| ValidationError::InvalidDate)?;
        let month = i8::try_from(month).map_err(|_source| ValidationError::InvalidDate)?;
        let day = i8::try_from(day).map_err(|_source| ValidationError::InvalidDate)?;

        Date::new(year, month, day)
            .map(Self)
            .map_err(|_source| ValidationError::InvalidDate)
    }

    /// The absolute instant at which a slot on this date starts, with the
    /// date and time interpreted as UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] if the civil datetime cannot
    /// be resolved to an instant.
    pub fn start_instant(self, time: SlotTime) -> Result<Timestamp, ValidationError> {
        DateTime::from_parts(self.0, time.0)
            .to_zoned(TimeZone::UTC)
            .map(|zoned| zoned.timestamp())
            .map_err(|_source| ValidationError::InvalidDate)
    }
}

impl FromStr for SlotDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SlotDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SlotDate> for String {
    fn from(value: SlotDate) -> Self {
        value.to_string()
    }
}

impl Display for SlotDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

/// A slot's 24-hour clock time in `HH:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(Time);

impl SlotTime {
    /// Parse an `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTime`] on anything but `00:00`
    /// through `23:59`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let mut parts = value.split(':');

        let hour = take_digits(parts.next(), 2).ok_or(ValidationError::InvalidTime)?;
        let minute = take_digits(parts.next(), 2).ok_or(ValidationError::InvalidTime)?;

        if parts.next().is_some() {
            return Err(ValidationError::InvalidTime);
        }

        let hour = i8::try_from(hour).map_err(|_source| ValidationError::InvalidTime)?;
        let minute = i8::try_from(minute).map_err(|_source| ValidationError::InvalidTime)?;

        Time::new(hour, minute, 0, 0)
            .map(Self)
            .map_err(|_source| ValidationError::InvalidTime)
    }
}

impl FromStr for SlotTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

impl Display for SlotTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// Parse a fixed-width run of ASCII digits, e.g. the `"07"` in `"07:30"`.
fn take_digits(part: Option<&str>, width: usize) -> Option<u32> {
    let part = part?;

    if part.len() != width || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    part.parse().ok()
}
