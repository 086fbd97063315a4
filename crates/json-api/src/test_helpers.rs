//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use slotmint::{ChainAddress, EthAmount, Slot, SlotDate, SlotTime, ValidationError};
use slotmint_app::context::AppContext;
use slotmint_app::meetings::MockMeetingProvisioner;
use slotmint_app::slots::MockSlotsService;
use slotmint_app::verification::MockVerificationService;

use crate::state::State;

pub(crate) fn stub_slot(booked: bool) -> Result<Slot, ValidationError> {
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
        join_url: "https://meet.example/j/88012345678".to_owned(),
    })
}

fn strict_slots_mock() -> MockSlotsService {
    let mut slots = MockSlotsService::new();

    slots.expect_mint().never();
    slots.expect_get_slot().never();
    slots.expect_book().never();

    slots
}

fn strict_verification_mock() -> MockVerificationService {
    let mut verification = MockVerificationService::new();

    verification.expect_verify().never();

    verification
}

fn strict_meetings_mock() -> MockMeetingProvisioner {
    let mut meetings = MockMeetingProvisioner::new();

    meetings.expect_create_meeting().never();
    meetings.expect_fetch_meeting().never();

    meetings
}

fn make_state(
    slots: MockSlotsService,
    verification: MockVerificationService,
    meetings: MockMeetingProvisioner,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        slots: Arc::new(slots),
        verification: Arc::new(verification),
        meetings: Arc::new(meetings),
    }))
}

pub(crate) fn slots_service(slots: MockSlotsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(
                slots,
                strict_verification_mock(),
                strict_meetings_mock(),
            )))
            .push(route),
    )
}

pub(crate) fn verification_service(
    verification: MockVerificationService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(
                strict_slots_mock(),
                verification,
                strict_meetings_mock(),
            )))
            .push(route),
    )
}

pub(crate) fn meetings_service(meetings: MockMeetingProvisioner, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(
                strict_slots_mock(),
                strict_verification_mock(),
                meetings,
            )))
            .push(route),
    )
}
