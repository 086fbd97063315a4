//! Ledger gateway errors.

use thiserror::Error;

use slotmint::EthAmount;

/// Errors from the ledger gateway.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The signing account cannot cover the estimated transaction cost.
    /// Raised before submission; not retryable without funding.
    #[error("insufficient funds: need {needed} ETH, have {available} ETH")]
    InsufficientFunds {
        /// Estimated total cost of the transaction.
        needed: EthAmount,
        /// Current signer balance.
        available: EthAmount,
    },

    /// The ledger rejected the transaction. During booking this most often
    /// means another buyer's transaction was included first.
    #[error("transaction reverted: {0}")]
    TransactionReverted(String),

    /// An RPC call or the confirmation wait exceeded its deadline. The
    /// outcome is unknown; callers must re-query state, never blindly retry.
    #[error("ledger request timed out")]
    Timeout,

    /// Transport-level failure reaching the ledger node.
    #[error("failed to reach ledger node")]
    Network(#[source] reqwest::Error),

    /// The node broke the JSON-RPC envelope contract.
    #[error("ledger protocol error: {0}")]
    Protocol(String),

    /// The node returned a typed error we do not classify further.
    #[error("ledger rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },

    /// Fee data had neither a max fee nor a legacy gas price.
    #[error("unable to fetch gas price")]
    MissingFeeData,

    /// A slot record from the node is missing or mangles required fields.
    #[error("malformed slot record: {0}")]
    MalformedRecord(String),
}

impl LedgerError {
    /// Classify a transport error, separating timeouts from connectivity.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }

        Self::Network(error)
    }

    /// Whether this error is the ledger refusing a state transition, as
    /// opposed to a transport or protocol failure.
    #[must_use]
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::TransactionReverted(_))
    }
}
