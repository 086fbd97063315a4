//! Slot lifecycle service.

mod errors;
mod models;
mod service;

pub use errors::SlotsServiceError;
pub use models::{BookOutcome, BookRequest, MintOutcome, MintRequest};
pub use service::{LiveSlotsService, MockSlotsService, SlotsService};
