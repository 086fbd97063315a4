//! Ledger Config

use std::time::Duration;

use clap::Args;

use slotmint::ChainAddress;
use slotmint_app::ledger::LedgerConfig;

/// Ledger node and slot contract settings.
#[derive(Debug, Args)]
pub struct LedgerNodeConfig {
    /// JSON-RPC endpoint of the ledger node
    #[arg(long, env = "LEDGER_RPC_URL")]
    pub rpc_url: String,

    /// Address of the slot contract
    #[arg(long, env = "CONTRACT_ADDRESS")]
    pub contract_address: ChainAddress,

    /// Address of the signing account submitting transactions
    #[arg(long, env = "SIGNER_ADDRESS")]
    pub signer_address: ChainAddress,

    /// Deadline for a single RPC round trip, in seconds
    #[arg(long, env = "LEDGER_REQUEST_TIMEOUT_SECONDS", default_value_t = 10)]
    pub request_timeout_seconds: u64,

    /// Deadline for a submitted transaction to confirm, in seconds
    #[arg(long, env = "LEDGER_CONFIRMATION_TIMEOUT_SECONDS", default_value_t = 120)]
    pub confirmation_timeout_seconds: u64,

    /// Interval between receipt polls, in milliseconds
    #[arg(long, env = "LEDGER_RECEIPT_POLL_INTERVAL_MS", default_value_t = 2_000)]
    pub receipt_poll_interval_ms: u64,
}

impl From<LedgerNodeConfig> for LedgerConfig {
    fn from(config: LedgerNodeConfig) -> Self {
        LedgerConfig {
            rpc_url: config.rpc_url,
            contract_address: config.contract_address,
            signer_address: config.signer_address,
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
            confirmation_timeout: Duration::from_secs(config.confirmation_timeout_seconds),
            receipt_poll_interval: Duration::from_millis(config.receipt_poll_interval_ms),
        }
    }
}
