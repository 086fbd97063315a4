//! Ledger gateway over the slot contract.

mod client;
mod errors;
mod gateway;
mod rpc;
mod wire;

pub use client::{LedgerConfig, RpcLedgerClient};
pub use errors::LedgerError;
pub use gateway::{
    BookSubmission, BookingReceipt, LedgerGateway, MintReceipt, MintSubmission, MockLedgerGateway,
};
