//! Gateways and services for the slot booking workflows.
//!
//! The two leaf gateways ([`ledger`], [`meetings`]) wrap the external systems;
//! [`slots`] orchestrates the mint and book workflows across them and
//! [`verification`] resolves booking keys back to meeting access. Everything
//! is wired together in [`context::AppContext`].

pub mod context;
pub mod ledger;
pub mod meetings;
pub mod slots;
pub mod verification;
