//! Booking verification.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use slotmint::{SlotDate, SlotRef, SlotTime};

use crate::ledger::LedgerGateway;
use crate::meetings::MeetingProvisioner;
use crate::verification::errors::VerificationError;

/// Meeting access details for a verified booking.
///
/// A deliberate projection: the owner and price are internals a booking-key
/// holder has no business seeing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingAccess {
    /// Join URL for the bound meeting.
    pub join_url: String,

    /// Start instant of the slot.
    pub start_time: Timestamp,

    /// Meeting topic, when the provider still has the record.
    pub topic: Option<String>,

    /// Provider meeting id.
    pub meeting_id: String,

    /// Slot date.
    pub date: SlotDate,

    /// Slot time.
    pub time: SlotTime,
}

/// Resolves booking keys (or slot ids) to meeting access details.
#[automock]
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Resolve an identifier to access details. Fails with `NotFound` when
    /// no slot resolves or the slot has never been booked.
    async fn verify(&self, reference: &SlotRef) -> Result<BookingAccess, VerificationError>;
}

/// [`VerificationService`] over the ledger read path.
///
/// Pure read: safe to retry and to call concurrently. The meeting topic is
/// enriched from the provider on a best-effort basis; access never depends
/// on the provider being reachable.
#[derive(Clone)]
pub struct LedgerVerificationService {
    ledger: Arc<dyn LedgerGateway>,
    meetings: Arc<dyn MeetingProvisioner>,
}

impl LedgerVerificationService {
    /// Create the service over the ledger and the meeting provider.
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerGateway>, meetings: Arc<dyn MeetingProvisioner>) -> Self {
        Self { ledger, meetings }
    }
}

#[async_trait]
impl VerificationService for LedgerVerificationService {
    async fn verify(&self, reference: &SlotRef) -> Result<BookingAccess, VerificationError> {
        let slot = self
            .ledger
            .slot_info(reference)
            .await
            .map_err(VerificationError::LedgerRead)?
            .ok_or(VerificationError::NotFound)?;

        if !slot.is_booked {
            return Err(VerificationError::NotFound);
        }

        let start_time = slot
            .date
            .start_instant(slot.time)
            .map_err(VerificationError::Validation)?;

        let topic = match self.meetings.fetch_meeting(&slot.meeting_id).await {
            Ok(meeting) => Some(meeting.topic),
            Err(error) => {
                debug!(meeting_id = %slot.meeting_id, "could not enrich topic: {error}");

                None
            }
        };

        Ok(BookingAccess {
            join_url: slot.join_url,
            start_time,
            topic,
            meeting_id: slot.meeting_id,
            date: slot.date,
            time: slot.time,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use slotmint::{ChainAddress, EthAmount, Slot, ValidationError};

    use crate::ledger::{LedgerError, MockLedgerGateway};
    use crate::meetings::{Meeting, MeetingError, MockMeetingProvisioner};

    use super::*;

    const JOIN_URL: &str = "https://meet.example/j/88012345678";

    fn stub_slot(booked: bool) -> Result<Slot, ValidationError> {
        Ok(Slot {
            slot_id: 7,
            date: SlotDate::parse("2099-01-01")?,
            time: SlotTime::parse("10:00")?,
            price: EthAmount::from_wei(10_000_000_000_000_000),
            owner: ChainAddress::parse("0x00000000000000000000000000000000000000aa")?,
            booked_by: booked
                .then(|| ChainAddress::parse("0x00000000000000000000000000000000000000bb"))
                .transpose()?,
            is_booked: booked,
            payment_released: false,
            meeting_id: "88012345678".to_owned(),
            join_url: JOIN_URL.to_owned(),
        })
    }

    fn stub_meeting() -> Result<Meeting, ValidationError> {
        Ok(Meeting {
            id: "88012345678".to_owned(),
            topic: "Design Review".to_owned(),
            join_url: JOIN_URL.to_owned(),
            start_url: "https://meet.example/s/88012345678".to_owned(),
            start_time: SlotDate::parse("2099-01-01")?.start_instant(SlotTime::parse("10:00")?)?,
            duration_minutes: 30,
        })
    }

    fn service(
        ledger: MockLedgerGateway,
        meetings: MockMeetingProvisioner,
    ) -> LedgerVerificationService {
        LedgerVerificationService::new(Arc::new(ledger), Arc::new(meetings))
    }

    #[tokio::test]
    async fn booked_slot_resolves_to_access_details() -> TestResult {
        let slot = stub_slot(true)?;
        let meeting = stub_meeting()?;

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .withf(|reference| *reference == SlotRef::Key("bk-2217".to_owned()))
            .return_once(move |_| Ok(Some(slot)));

        let mut meetings = MockMeetingProvisioner::new();

        meetings
            .expect_fetch_meeting()
            .once()
            .withf(|meeting_id| meeting_id == "88012345678")
            .return_once(move |_| Ok(meeting));

        let access = service(ledger, meetings)
            .verify(&SlotRef::Key("bk-2217".to_owned()))
            .await?;

        assert_eq!(access.join_url, JOIN_URL);
        assert_eq!(access.topic.as_deref(), Some("Design Review"));
        assert_eq!(access.start_time.to_string(), "2099-01-01T10:00:00Z");
        assert_eq!(access.date.to_string(), "2099-01-01");
        assert_eq!(access.time.to_string(), "10:00");

        Ok(())
    }

    #[tokio::test]
    async fn unbooked_slot_does_not_verify() -> TestResult {
        let slot = stub_slot(false)?;

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .return_once(move |_| Ok(Some(slot)));

        let mut meetings = MockMeetingProvisioner::new();
        meetings.expect_fetch_meeting().never();

        let result = service(ledger, meetings)
            .verify(&SlotRef::Key("bk-2217".to_owned()))
            .await;

        assert!(matches!(result, Err(VerificationError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_identifier_does_not_verify() {
        let mut ledger = MockLedgerGateway::new();

        ledger.expect_slot_info().once().return_once(|_| Ok(None));

        let mut meetings = MockMeetingProvisioner::new();
        meetings.expect_fetch_meeting().never();

        let result = service(ledger, meetings)
            .verify(&SlotRef::Key("bk-0000".to_owned()))
            .await;

        assert!(matches!(result, Err(VerificationError::NotFound)));
    }

    #[tokio::test]
    async fn provider_outage_does_not_block_access() -> TestResult {
        let slot = stub_slot(true)?;

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .return_once(move |_| Ok(Some(slot)));

        let mut meetings = MockMeetingProvisioner::new();

        meetings
            .expect_fetch_meeting()
            .once()
            .return_once(|_| Err(MeetingError::Timeout));

        let access = service(ledger, meetings)
            .verify(&SlotRef::Id(7))
            .await?;

        assert_eq!(access.join_url, JOIN_URL);
        assert_eq!(access.topic, None);

        Ok(())
    }

    #[tokio::test]
    async fn ledger_failures_propagate_typed() {
        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .return_once(|_| Err(LedgerError::Timeout));

        let mut meetings = MockMeetingProvisioner::new();
        meetings.expect_fetch_meeting().never();

        let result = service(ledger, meetings).verify(&SlotRef::Id(7)).await;

        assert!(matches!(result, Err(VerificationError::LedgerRead(_))));
    }
}
