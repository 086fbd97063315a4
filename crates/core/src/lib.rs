//! Domain types for tokenized meeting time slots.
//!
//! A provider mints a bookable time slot on a ledger, a buyer pays the listed
//! ETH price to book it, and the booking key issued by the ledger later
//! resolves back to the meeting access details. This crate holds the pure
//! domain vocabulary for that lifecycle: chain addresses, ETH amounts with
//! exact wei conversion, slot dates and times, the slot/booking-key
//! identifier union, the canonical [`Slot`] record, and mint-input
//! validation. It performs no I/O; the gateways and services live in
//! `slotmint-app`.

pub mod address;
pub mod amount;
pub mod errors;
pub mod identifier;
pub mod mint;
pub mod schedule;
pub mod slot;

pub use address::ChainAddress;
pub use amount::EthAmount;
pub use errors::ValidationError;
pub use identifier::SlotRef;
pub use mint::MintInput;
pub use schedule::{SlotDate, SlotTime};
pub use slot::Slot;
