//! Slot lifecycle workflows.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::warn;

use slotmint::{ChainAddress, MintInput, Slot, SlotRef};

use crate::ledger::{BookSubmission, LedgerGateway, MintSubmission};
use crate::meetings::{MeetingProvisioner, NewMeeting};
use crate::slots::errors::SlotsServiceError;
use crate::slots::models::{BookOutcome, BookRequest, MintOutcome, MintRequest};

/// Orchestrates minting and booking across the meeting provider and the
/// ledger.
///
/// Holds no state of its own and no locks: concurrent requests for different
/// slots proceed fully in parallel, and races on the same slot are settled by
/// the ledger's atomic booking transition, not here. An application-level
/// mutex could not cover a second service instance anyway.
#[derive(Clone)]
pub struct LiveSlotsService {
    meetings: Arc<dyn MeetingProvisioner>,
    ledger: Arc<dyn LedgerGateway>,
}

impl LiveSlotsService {
    /// Create the service over the two gateways.
    #[must_use]
    pub fn new(meetings: Arc<dyn MeetingProvisioner>, ledger: Arc<dyn LedgerGateway>) -> Self {
        Self { meetings, ledger }
    }
}

#[async_trait]
impl SlotsService for LiveSlotsService {
    async fn mint(&self, request: MintRequest) -> Result<MintOutcome, SlotsServiceError> {
        let input = MintInput::parse(
            &request.topic,
            &request.date,
            &request.time,
            request.duration_minutes,
            &request.price,
            &request.owner,
        )?;

        let start = input.start_in_future(Timestamp::now())?;

        let meeting = self
            .meetings
            .create_meeting(NewMeeting {
                topic: input.topic.clone(),
                start_time: start,
                duration_minutes: input.duration_minutes,
            })
            .await
            .map_err(SlotsServiceError::MeetingProvisioning)?;

        let receipt = self
            .ledger
            .mint_slot(MintSubmission {
                date: input.date,
                time: input.time,
                price: input.price,
                owner: input.owner,
                meeting_id: meeting.id.clone(),
                join_url: meeting.join_url.clone(),
            })
            .await
            .map_err(|error| {
                // The meeting exists with no slot behind it; there is no
                // rollback path on the provider side.
                warn!(meeting_id = %meeting.id, "mint failed after meeting creation, meeting is orphaned");

                SlotsServiceError::MintSubmission(error)
            })?;

        if receipt.slot_id.is_none() {
            warn!(tx_hash = %receipt.tx_hash, "mint succeeded but no slot id was confirmed");
        }

        Ok(MintOutcome {
            tx_hash: receipt.tx_hash,
            slot_id: receipt.slot_id,
            block_number: receipt.block_number,
            meeting_id: meeting.id,
            join_url: meeting.join_url,
            start_url: meeting.start_url,
            start_time: meeting.start_time,
            topic: input.topic,
            date: input.date,
            time: input.time,
            duration_minutes: input.duration_minutes,
            price: input.price,
        })
    }

    async fn get_slot(&self, slot_id: u64) -> Result<Slot, SlotsServiceError> {
        self.ledger
            .slot_info(&SlotRef::Id(slot_id))
            .await
            .map_err(SlotsServiceError::LedgerRead)?
            .ok_or(SlotsServiceError::NotFound)
    }

    async fn book(&self, request: BookRequest) -> Result<BookOutcome, SlotsServiceError> {
        let buyer = ChainAddress::parse(&request.buyer_address)?;

        let slot = self.get_slot(request.slot_id).await?;

        // Advisory only: the check races against other buyers, but failing
        // here saves the gas of a doomed transaction. The ledger settles the
        // race; a lost race surfaces as a revert from book_slot.
        if slot.is_booked {
            return Err(SlotsServiceError::AlreadyBooked);
        }

        let price = self
            .ledger
            .slot_price(request.slot_id)
            .await
            .map_err(SlotsServiceError::LedgerRead)?;

        if price.is_zero() {
            return Err(SlotsServiceError::InvalidState(
                "slot has no listed price".to_owned(),
            ));
        }

        let receipt = self
            .ledger
            .book_slot(BookSubmission {
                slot_id: request.slot_id,
                buyer,
                price,
            })
            .await
            .map_err(SlotsServiceError::BookSubmission)?;

        Ok(BookOutcome {
            tx_hash: receipt.tx_hash,
            booking_key: receipt.booking_key,
            block_number: receipt.block_number,
            slot: Slot { price, ..slot },
        })
    }
}

/// The slot lifecycle operations the HTTP surface is built on.
#[automock]
#[async_trait]
pub trait SlotsService: Send + Sync {
    /// Mint a slot: create the meeting, then mint on the ledger with the
    /// meeting embedded.
    async fn mint(&self, request: MintRequest) -> Result<MintOutcome, SlotsServiceError>;

    /// Read a slot by id.
    async fn get_slot(&self, slot_id: u64) -> Result<Slot, SlotsServiceError>;

    /// Book a slot: existence and bookability checks, then payment.
    async fn book(&self, request: BookRequest) -> Result<BookOutcome, SlotsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use slotmint::{EthAmount, SlotDate, SlotTime, ValidationError};

    use crate::ledger::{BookingReceipt, LedgerError, MintReceipt, MockLedgerGateway};
    use crate::meetings::{Meeting, MeetingError, MockMeetingProvisioner};

    use super::*;

    const OWNER: &str = "0xabcabcabcabcabcabcabcabcabcabcabcabcabca";
    const BUYER: &str = "0x00000000000000000000000000000000000000bb";
    const JOIN_URL: &str = "https://meet.example/j/88012345678";

    fn mint_request() -> MintRequest {
        MintRequest {
            topic: "Design Review".to_owned(),
            date: "2099-01-01".to_owned(),
            time: "10:00".to_owned(),
            duration_minutes: 30,
            price: "0.01".to_owned(),
            owner: OWNER.to_owned(),
        }
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

    fn stub_slot(booked: bool) -> Result<Slot, ValidationError> {
        Ok(Slot {
            slot_id: 7,
            date: SlotDate::parse("2099-01-01")?,
            time: SlotTime::parse("10:00")?,
            price: EthAmount::from_wei(10_000_000_000_000_000),
            owner: ChainAddress::parse(OWNER)?,
            booked_by: booked.then(|| ChainAddress::parse(BUYER)).transpose()?,
            is_booked: booked,
            payment_released: false,
            meeting_id: "88012345678".to_owned(),
            join_url: JOIN_URL.to_owned(),
        })
    }

    /// A provisioner that must not be reached.
    fn untouched_meetings() -> MockMeetingProvisioner {
        let mut meetings = MockMeetingProvisioner::new();

        meetings.expect_create_meeting().never();
        meetings.expect_fetch_meeting().never();

        meetings
    }

    /// A ledger that must not be reached.
    fn untouched_ledger() -> MockLedgerGateway {
        let mut ledger = MockLedgerGateway::new();

        ledger.expect_mint_slot().never();
        ledger.expect_slot_info().never();
        ledger.expect_slot_price().never();
        ledger.expect_book_slot().never();

        ledger
    }

    /// A provisioner that creates exactly one meeting.
    fn meetings_creating(meeting: Meeting) -> MockMeetingProvisioner {
        let mut meetings = MockMeetingProvisioner::new();

        meetings
            .expect_create_meeting()
            .once()
            .return_once(move |_| Ok(meeting));
        meetings.expect_fetch_meeting().never();

        meetings
    }

    fn service(meetings: MockMeetingProvisioner, ledger: MockLedgerGateway) -> LiveSlotsService {
        LiveSlotsService::new(Arc::new(meetings), Arc::new(ledger))
    }

    #[tokio::test]
    async fn mint_combines_ledger_receipt_and_meeting() -> TestResult {
        let meeting = stub_meeting()?;
        let expected_start = meeting.start_time;

        let mut meetings = MockMeetingProvisioner::new();

        meetings
            .expect_create_meeting()
            .once()
            .withf(move |new| {
                new.topic == "Design Review"
                    && new.start_time == expected_start
                    && new.duration_minutes == 30
            })
            .return_once(move |_| Ok(meeting));

        meetings.expect_fetch_meeting().never();

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_mint_slot()
            .once()
            .withf(|submission| {
                submission.meeting_id == "88012345678"
                    && submission.join_url == JOIN_URL
                    && submission.price.to_wei() == 10_000_000_000_000_000
                    && submission.owner.as_str() == OWNER
            })
            .return_once(|_| {
                Ok(MintReceipt {
                    tx_hash: "0xmint".to_owned(),
                    slot_id: Some(12),
                    block_number: 41,
                })
            });

        ledger.expect_slot_info().never();
        ledger.expect_slot_price().never();
        ledger.expect_book_slot().never();

        let outcome = service(meetings, ledger).mint(mint_request()).await?;

        assert_eq!(outcome.tx_hash, "0xmint");
        assert_eq!(outcome.slot_id, Some(12));
        assert_eq!(outcome.join_url, JOIN_URL);
        assert_eq!(outcome.meeting_id, "88012345678");
        assert_eq!(outcome.duration_minutes, 30);
        assert_eq!(outcome.price.to_string(), "0.01");

        Ok(())
    }

    #[tokio::test]
    async fn mint_without_confirmation_event_still_succeeds() -> TestResult {
        let meetings = meetings_creating(stub_meeting()?);

        let mut ledger = MockLedgerGateway::new();

        ledger.expect_mint_slot().once().return_once(|_| {
            Ok(MintReceipt {
                tx_hash: "0xmint".to_owned(),
                slot_id: None,
                block_number: 41,
            })
        });

        let outcome = service(meetings, ledger).mint(mint_request()).await?;

        assert_eq!(outcome.slot_id, None);
        assert_eq!(outcome.tx_hash, "0xmint");

        Ok(())
    }

    #[tokio::test]
    async fn mint_rejects_duration_bounds_without_external_calls() {
        for duration in [0, 1441] {
            let mut request = mint_request();
            request.duration_minutes = duration;

            let result = service(untouched_meetings(), untouched_ledger())
                .mint(request)
                .await;

            assert!(
                matches!(
                    result,
                    Err(SlotsServiceError::Validation(
                        ValidationError::InvalidDuration
                    ))
                ),
                "expected rejection for duration {duration}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn mint_accepts_duration_bounds() -> TestResult {
        for duration in [1, 1440] {
            let meetings = meetings_creating(stub_meeting()?);

            let mut ledger = MockLedgerGateway::new();

            ledger.expect_mint_slot().once().return_once(|_| {
                Ok(MintReceipt {
                    tx_hash: "0xmint".to_owned(),
                    slot_id: Some(1),
                    block_number: 1,
                })
            });

            let mut request = mint_request();
            request.duration_minutes = duration;

            service(meetings, ledger).mint(request).await?;
        }

        Ok(())
    }

    #[tokio::test]
    async fn mint_rejects_non_positive_prices_without_external_calls() {
        for price in ["0", "-0.01"] {
            let mut request = mint_request();
            request.price = price.to_owned();

            let result = service(untouched_meetings(), untouched_ledger())
                .mint(request)
                .await;

            assert!(
                matches!(result, Err(SlotsServiceError::Validation(_))),
                "expected rejection for price {price}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn mint_rejects_past_slots_without_external_calls() {
        let mut request = mint_request();
        request.date = "2001-01-01".to_owned();

        let result = service(untouched_meetings(), untouched_ledger())
            .mint(request)
            .await;

        assert!(matches!(
            result,
            Err(SlotsServiceError::Validation(
                ValidationError::StartNotInFuture
            ))
        ));
    }

    #[tokio::test]
    async fn mint_rejects_malformed_owner_without_external_calls() {
        let mut request = mint_request();
        request.owner = "not-an-address".to_owned();

        let result = service(untouched_meetings(), untouched_ledger())
            .mint(request)
            .await;

        assert!(matches!(
            result,
            Err(SlotsServiceError::Validation(ValidationError::InvalidAddress))
        ));
    }

    #[tokio::test]
    async fn meeting_failure_terminates_mint_before_the_ledger() {
        let mut meetings = MockMeetingProvisioner::new();

        meetings
            .expect_create_meeting()
            .once()
            .return_once(|_| Err(MeetingError::Provider("boom".to_owned())));
        meetings.expect_fetch_meeting().never();

        let result = service(meetings, untouched_ledger())
            .mint(mint_request())
            .await;

        assert!(matches!(
            result,
            Err(SlotsServiceError::MeetingProvisioning(_))
        ));
    }

    #[tokio::test]
    async fn ledger_failure_after_meeting_creation_is_a_mint_error() -> TestResult {
        let meetings = meetings_creating(stub_meeting()?);

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_mint_slot()
            .once()
            .return_once(|_| Err(LedgerError::Timeout));

        let result = service(meetings, ledger).mint(mint_request()).await;

        assert!(matches!(result, Err(SlotsServiceError::MintSubmission(_))));

        Ok(())
    }

    #[tokio::test]
    async fn book_pays_the_listed_price() -> TestResult {
        let slot = stub_slot(false)?;

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .withf(|reference| *reference == SlotRef::Id(7))
            .return_once(move |_| Ok(Some(slot)));

        ledger
            .expect_slot_price()
            .once()
            .withf(|slot_id| *slot_id == 7)
            .return_once(|_| Ok(EthAmount::from_wei(10_000_000_000_000_000)));

        ledger
            .expect_book_slot()
            .once()
            .withf(|submission| {
                submission.slot_id == 7
                    && submission.buyer.as_str() == BUYER
                    && submission.price.to_wei() == 10_000_000_000_000_000
            })
            .return_once(|_| {
                Ok(BookingReceipt {
                    tx_hash: "0xbook".to_owned(),
                    booking_key: Some("bk-2217".to_owned()),
                    block_number: 42,
                    slot_id: 7,
                })
            });

        ledger.expect_mint_slot().never();

        let outcome = service(untouched_meetings(), ledger)
            .book(BookRequest {
                slot_id: 7,
                buyer_address: BUYER.to_owned(),
            })
            .await?;

        assert_eq!(outcome.tx_hash, "0xbook");
        assert_eq!(outcome.booking_key.as_deref(), Some("bk-2217"));
        assert_eq!(outcome.slot.slot_id, 7);
        assert_eq!(outcome.slot.price.to_wei(), 10_000_000_000_000_000);

        Ok(())
    }

    #[tokio::test]
    async fn booking_a_missing_slot_is_not_found() {
        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .withf(|reference| *reference == SlotRef::Id(999_999))
            .return_once(|_| Ok(None));

        ledger.expect_mint_slot().never();
        ledger.expect_slot_price().never();
        ledger.expect_book_slot().never();

        let result = service(untouched_meetings(), ledger)
            .book(BookRequest {
                slot_id: 999_999,
                buyer_address: BUYER.to_owned(),
            })
            .await;

        assert!(matches!(result, Err(SlotsServiceError::NotFound)));
    }

    #[tokio::test]
    async fn booking_a_booked_slot_stops_before_payment() -> TestResult {
        let slot = stub_slot(true)?;

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .return_once(move |_| Ok(Some(slot)));

        ledger.expect_mint_slot().never();
        ledger.expect_slot_price().never();
        ledger.expect_book_slot().never();

        let result = service(untouched_meetings(), ledger)
            .book(BookRequest {
                slot_id: 7,
                buyer_address: BUYER.to_owned(),
            })
            .await;

        assert!(matches!(result, Err(SlotsServiceError::AlreadyBooked)));

        Ok(())
    }

    #[tokio::test]
    async fn booking_a_zero_priced_slot_is_invalid_state() -> TestResult {
        let slot = stub_slot(false)?;

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .return_once(move |_| Ok(Some(slot)));

        ledger
            .expect_slot_price()
            .once()
            .return_once(|_| Ok(EthAmount::ZERO));

        ledger.expect_mint_slot().never();
        ledger.expect_book_slot().never();

        let result = service(untouched_meetings(), ledger)
            .book(BookRequest {
                slot_id: 7,
                buyer_address: BUYER.to_owned(),
            })
            .await;

        assert!(matches!(result, Err(SlotsServiceError::InvalidState(_))));

        Ok(())
    }

    #[tokio::test]
    async fn booking_rejects_malformed_buyer_without_external_calls() {
        let result = service(untouched_meetings(), untouched_ledger())
            .book(BookRequest {
                slot_id: 7,
                buyer_address: "0xnope".to_owned(),
            })
            .await;

        assert!(matches!(
            result,
            Err(SlotsServiceError::Validation(ValidationError::InvalidAddress))
        ));
    }

    #[tokio::test]
    async fn lost_booking_race_surfaces_as_a_revert() -> TestResult {
        let slot = stub_slot(false)?;

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .return_once(move |_| Ok(Some(slot)));

        ledger
            .expect_slot_price()
            .once()
            .return_once(|_| Ok(EthAmount::from_wei(10_000_000_000_000_000)));

        ledger.expect_book_slot().once().return_once(|_| {
            Err(LedgerError::TransactionReverted(
                "bookSlot transaction 0xbook reverted".to_owned(),
            ))
        });

        ledger.expect_mint_slot().never();

        let result = service(untouched_meetings(), ledger)
            .book(BookRequest {
                slot_id: 7,
                buyer_address: BUYER.to_owned(),
            })
            .await;

        match result {
            Err(SlotsServiceError::BookSubmission(source)) => {
                assert!(source.is_revert(), "expected a revert, got {source:?}");
            }
            other => return Err(format!("expected BookSubmission, got {other:?}").into()),
        }

        Ok(())
    }

    #[tokio::test]
    async fn get_slot_returns_the_record() -> TestResult {
        let slot = stub_slot(false)?;
        let expected = slot.clone();

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .once()
            .return_once(move |_| Ok(Some(slot)));

        let found = service(untouched_meetings(), ledger).get_slot(7).await?;

        assert_eq!(found, expected);

        Ok(())
    }

    #[tokio::test]
    async fn reading_a_slot_twice_returns_identical_records() -> TestResult {
        let slot = stub_slot(false)?;

        let mut ledger = MockLedgerGateway::new();

        ledger
            .expect_slot_info()
            .times(2)
            .returning(move |_| Ok(Some(slot.clone())));

        let service = service(untouched_meetings(), ledger);

        let first = service.get_slot(7).await?;
        let second = service.get_slot(7).await?;

        assert_eq!(first, second);

        Ok(())
    }

    #[tokio::test]
    async fn get_slot_maps_absence_to_not_found() {
        let mut ledger = MockLedgerGateway::new();

        ledger.expect_slot_info().once().return_once(|_| Ok(None));

        let result = service(untouched_meetings(), ledger).get_slot(7).await;

        assert!(matches!(result, Err(SlotsServiceError::NotFound)));
    }
}
