//! Booking verification service.

mod errors;
mod service;

pub use errors::VerificationError;
pub use service::{
    BookingAccess, LedgerVerificationService, MockVerificationService, VerificationService,
};
