//! Slot route error mapping.

use salvo::http::StatusError;
use tracing::error;

use slotmint_app::ledger::LedgerError;
use slotmint_app::slots::SlotsServiceError;
use slotmint_app::verification::VerificationError;

use crate::meetings::errors::into_status_error as meeting_into_status_error;

pub(crate) fn into_status_error(error: SlotsServiceError) -> StatusError {
    match error {
        SlotsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        SlotsServiceError::NotFound => StatusError::not_found().brief("Slot not found"),
        SlotsServiceError::AlreadyBooked => {
            StatusError::bad_request().brief("Slot is already booked")
        }
        SlotsServiceError::InvalidState(_detail) => {
            StatusError::bad_request().brief("Invalid slot price")
        }
        SlotsServiceError::MeetingProvisioning(source) => meeting_into_status_error(source),
        SlotsServiceError::MintSubmission(source) | SlotsServiceError::BookSubmission(source) => {
            ledger_submission_status_error(source)
        }
        SlotsServiceError::LedgerRead(source) => ledger_read_status_error(source),
    }
}

pub(crate) fn verification_into_status_error(error: VerificationError) -> StatusError {
    match error {
        VerificationError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        VerificationError::NotFound => {
            StatusError::not_found().brief("Invalid booking key or slot not booked")
        }
        VerificationError::LedgerRead(source) => ledger_read_status_error(source),
    }
}

fn ledger_submission_status_error(error: LedgerError) -> StatusError {
    match error {
        LedgerError::InsufficientFunds { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        LedgerError::TransactionReverted(_detail) => {
            // During booking this is almost always a lost race.
            StatusError::bad_request().brief("Transaction reverted; re-check the slot status")
        }
        LedgerError::Timeout => StatusError::gateway_timeout()
            .brief("Transaction status unknown; check back before retrying"),
        LedgerError::Network(source) => {
            error!("ledger node unreachable: {source}");

            StatusError::service_unavailable().brief("Blockchain network unavailable")
        }
        LedgerError::Protocol(_)
        | LedgerError::Rpc { .. }
        | LedgerError::MissingFeeData
        | LedgerError::MalformedRecord(_) => {
            error!("ledger submission failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

fn ledger_read_status_error(error: LedgerError) -> StatusError {
    match error {
        LedgerError::Timeout => StatusError::gateway_timeout().brief("Request timeout"),
        LedgerError::Network(source) => {
            error!("ledger node unreachable: {source}");

            StatusError::service_unavailable().brief("Blockchain network unavailable")
        }
        other => {
            error!("ledger read failed: {other}");

            StatusError::internal_server_error()
        }
    }
}
