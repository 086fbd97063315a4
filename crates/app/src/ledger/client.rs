//! JSON-RPC ledger client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use slotmint::{EthAmount, Slot, SlotRef};

use crate::ledger::errors::LedgerError;
use crate::ledger::gateway::{
    BookSubmission, BookingReceipt, LedgerGateway, MintReceipt, MintSubmission,
};
use crate::ledger::rpc::{METHOD_NOT_FOUND, RpcTransport, parse_quantity, parse_wei, to_hex};
use crate::ledger::wire::{WireFeeData, WireReceipt, WireSlot, normalize};

/// Gas limits are padded by this percentage over the node's estimate.
const GAS_BUFFER_PERCENT: u64 = 20;

/// Configuration for the ledger node and slot contract.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the node.
    pub rpc_url: String,

    /// Address of the slot contract.
    pub contract_address: slotmint::ChainAddress,

    /// Address of the signing account submitting transactions.
    pub signer_address: slotmint::ChainAddress,

    /// Deadline for a single RPC round trip.
    pub request_timeout: Duration,

    /// Deadline for a submitted transaction to confirm.
    pub confirmation_timeout: Duration,

    /// Interval between receipt polls while waiting for confirmation.
    pub receipt_poll_interval: Duration,
}

impl LedgerConfig {
    /// Configuration with default timeouts.
    #[must_use]
    pub fn new(
        rpc_url: String,
        contract_address: slotmint::ChainAddress,
        signer_address: slotmint::ChainAddress,
    ) -> Self {
        Self {
            rpc_url,
            contract_address,
            signer_address,
            request_timeout: Duration::from_secs(10),
            confirmation_timeout: Duration::from_secs(120),
            receipt_poll_interval: Duration::from_secs(2),
        }
    }
}

/// [`LedgerGateway`] implementation over the node's typed contract surface.
#[derive(Debug)]
pub struct RpcLedgerClient {
    transport: RpcTransport,
    config: LedgerConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContractCall {
    to: String,
    from: String,
    method: &'static str,
    params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_fee_per_gas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_priority_fee_per_gas: Option<String>,
}

impl RpcLedgerClient {
    /// Create a client for the configured node and contract.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            transport: RpcTransport::new(config.rpc_url.clone(), config.request_timeout),
            config,
        }
    }

    fn call_template(&self, method: &'static str, params: Value, value: Option<u128>) -> ContractCall {
        ContractCall {
            to: self.config.contract_address.to_string(),
            from: self.config.signer_address.to_string(),
            method,
            params,
            value: value.map(to_hex),
            gas_limit: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
        }
    }

    async fn signer_balance(&self) -> Result<u128, LedgerError> {
        let raw: String = self
            .transport
            .call(
                "eth_getBalance",
                (self.config.signer_address.as_str(), "latest"),
            )
            .await?;

        parse_wei(&raw)
    }

    async fn fee_data(&self) -> Result<WireFeeData, LedgerError> {
        self.transport.call("eth_feeData", Vec::<()>::new()).await
    }

    /// Estimate, cost, balance-check, submit, and wait for confirmation.
    ///
    /// `value` is wei transferred with the call (the slot price for
    /// bookings), counted into the affordability check on top of gas.
    async fn submit(
        &self,
        method: &'static str,
        params: Value,
        value: Option<u128>,
    ) -> Result<(String, WireReceipt), LedgerError> {
        let mut call = self.call_template(method, params, value);

        let raw_gas: String = self.transport.call("slot_estimateGas", (&call,)).await?;
        let gas = parse_quantity(&raw_gas)?;

        let fees = self.fee_data().await?;
        let gas_price = fees.effective_price()?;

        let gas_limit = gas.saturating_mul(100 + GAS_BUFFER_PERCENT) / 100;

        // The affordability check costs the buffered limit, not the bare
        // estimate, so a transaction that fits the estimate but not the
        // buffer fails here instead of on-chain.
        let gas_cost = u128::from(gas_limit)
            .checked_mul(gas_price)
            .ok_or_else(|| LedgerError::Protocol("gas cost overflow".to_owned()))?;

        let total_cost = gas_cost
            .checked_add(value.unwrap_or(0))
            .ok_or_else(|| LedgerError::Protocol("transaction cost overflow".to_owned()))?;

        let balance = self.signer_balance().await?;

        if balance < total_cost {
            return Err(LedgerError::InsufficientFunds {
                needed: EthAmount::from_wei(total_cost),
                available: EthAmount::from_wei(balance),
            });
        }

        call.gas_limit = Some(to_hex(gas_limit.into()));
        call.max_fee_per_gas = Some(to_hex(gas_price));
        call.max_priority_fee_per_gas = fees.max_priority_fee_per_gas.clone();

        debug!(method, gas, gas_price, "submitting transaction");

        let tx_hash: String = self
            .transport
            .call("slot_sendTransaction", (&call,))
            .await?;

        info!(method, %tx_hash, "transaction sent, waiting for confirmation");

        let receipt = self.wait_for_receipt(&tx_hash).await?;

        if !receipt.succeeded() {
            return Err(LedgerError::TransactionReverted(format!(
                "{method} transaction {tx_hash} reverted"
            )));
        }

        Ok((tx_hash, receipt))
    }

    /// Poll for the transaction receipt until the confirmation deadline.
    ///
    /// On expiry the transaction may still confirm later; the resulting
    /// [`LedgerError::Timeout`] marks the outcome as unknown.
    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<WireReceipt, LedgerError> {
        let poll = async {
            loop {
                let found: Option<WireReceipt> = self
                    .transport
                    .call("eth_getTransactionReceipt", (tx_hash,))
                    .await?;

                if let Some(receipt) = found {
                    return Ok(receipt);
                }

                tokio::time::sleep(self.config.receipt_poll_interval).await;
            }
        };

        tokio::time::timeout(self.config.confirmation_timeout, poll)
            .await
            .map_err(|_elapsed| LedgerError::Timeout)?
    }

    async fn fetch_by_id(&self, slot_id: u64) -> Result<Option<Slot>, LedgerError> {
        match self
            .transport
            .call::<_, Option<WireSlot>>("slot_getSlotInfo", (slot_id,))
            .await
        {
            Ok(Some(wire)) => normalize(wire),
            Ok(None) => Ok(None),
            Err(error) if is_read_miss(&error) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn fetch_by_key(&self, key: &str) -> Result<KeyLookup, LedgerError> {
        match self
            .transport
            .call::<_, Option<WireSlot>>("slot_getSlotByBookingKey", (key,))
            .await
        {
            Ok(Some(wire)) => Ok(normalize(wire)?.map_or(KeyLookup::Empty, KeyLookup::Found)),
            Ok(None) => Ok(KeyLookup::Empty),
            Err(error) if is_read_miss(&error) => Ok(KeyLookup::Miss),
            Err(error) => Err(error),
        }
    }
}

/// Outcome of a booking-key lookup. Only a failed lookup (`Miss`) is
/// eligible for the digits fallback; an empty record is an answer.
enum KeyLookup {
    Found(Slot),
    Empty,
    Miss,
}

/// Whether a read failure means "no such slot" rather than a real fault.
fn is_read_miss(error: &LedgerError) -> bool {
    match error {
        LedgerError::TransactionReverted(_) => true,
        LedgerError::Rpc { message, .. } => message.to_ascii_lowercase().contains("does not exist"),
        _ => false,
    }
}

#[async_trait]
impl LedgerGateway for RpcLedgerClient {
    async fn mint_slot(&self, submission: MintSubmission) -> Result<MintReceipt, LedgerError> {
        let params = json!([
            submission.date.to_string(),
            submission.time.to_string(),
            to_hex(submission.price.to_wei()),
            submission.owner.as_str(),
            submission.meeting_id,
            submission.join_url,
        ]);

        let (tx_hash, receipt) = self.submit("mintSlot", params, None).await?;

        let slot_id = receipt
            .event_arg("SlotMinted", "slotId")
            .and_then(event_quantity);

        if slot_id.is_none() {
            warn!(%tx_hash, "mint confirmed without a SlotMinted event");
        }

        Ok(MintReceipt {
            block_number: receipt.block()?,
            tx_hash,
            slot_id,
        })
    }

    async fn slot_info(&self, reference: &SlotRef) -> Result<Option<Slot>, LedgerError> {
        match reference {
            SlotRef::Id(slot_id) => self.fetch_by_id(*slot_id).await,
            SlotRef::Key(key) => match self.fetch_by_key(key).await? {
                KeyLookup::Found(slot) => Ok(Some(slot)),
                KeyLookup::Empty => Ok(None),
                // Second, distinct attempt: keys that read as digits may
                // actually be slot ids.
                KeyLookup::Miss => match reference.fallback_id() {
                    Some(slot_id) => self.fetch_by_id(slot_id).await,
                    None => Ok(None),
                },
            },
        }
    }

    async fn slot_price(&self, slot_id: u64) -> Result<EthAmount, LedgerError> {
        for accessor in ["slot_price", "slot_getSlotPrice"] {
            match self.transport.call::<_, String>(accessor, (slot_id,)).await {
                Ok(raw) => return Ok(EthAmount::from_wei(parse_wei(&raw)?)),
                Err(LedgerError::Rpc {
                    code: METHOD_NOT_FOUND,
                    ..
                }) => continue,
                Err(error) => return Err(error),
            }
        }

        // Neither accessor exists on this node; take the price off the record.
        self.fetch_by_id(slot_id)
            .await?
            .map(|slot| slot.price)
            .ok_or_else(|| LedgerError::MalformedRecord(format!("slot {slot_id} has no record")))
    }

    async fn book_slot(&self, submission: BookSubmission) -> Result<BookingReceipt, LedgerError> {
        let params = json!([submission.slot_id]);

        let (tx_hash, receipt) = self
            .submit("bookSlot", params, Some(submission.price.to_wei()))
            .await?;

        let booking_key = receipt
            .event_arg("SlotBooked", "bookingKey")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);

        if booking_key.is_none() {
            warn!(%tx_hash, "booking confirmed without a SlotBooked event");
        }

        Ok(BookingReceipt {
            block_number: receipt.block()?,
            tx_hash,
            booking_key,
            slot_id: submission.slot_id,
        })
    }
}

/// Read an event argument that nodes encode either as a JSON number or a
/// quantity string.
fn event_quantity(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(raw) => parse_quantity(raw).ok(),
        _ => None,
    }
}
