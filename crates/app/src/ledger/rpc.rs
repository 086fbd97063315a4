//! JSON-RPC 2.0 transport for the ledger node.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ledger::errors::LedgerError;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// JSON-RPC error code for an unknown method, used to drive accessor-name
/// fallbacks.
pub(crate) const METHOD_NOT_FOUND: i64 = -32601;

/// HTTP JSON-RPC client with incrementing request ids.
#[derive(Debug)]
pub(crate) struct RpcTransport {
    http: Client,
    url: String,
    request_timeout: Duration,
    request_id: AtomicU64,
}

impl RpcTransport {
    pub(crate) fn new(url: String, request_timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            url,
            request_timeout,
            request_id: AtomicU64::new(1),
        }
    }

    /// Make one JSON-RPC call. Reverts and other node-reported failures come
    /// back as classified [`LedgerError`]s.
    pub(crate) async fn call<P, R>(&self, method: &str, params: P) -> Result<R, LedgerError>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(LedgerError::from_transport)?;

        let parsed: JsonRpcResponse = response
            .json()
            .await
            .map_err(LedgerError::from_transport)?;

        if let Some(error) = parsed.error {
            return Err(classify_rpc_error(error));
        }

        // An absent result deserializes through `null` so pending lookups
        // (e.g. an unmined receipt) come back as `None` rather than a
        // protocol error.
        let result = parsed.result.unwrap_or(serde_json::Value::Null);

        serde_json::from_value(result).map_err(|source| {
            LedgerError::Protocol(format!("{method} returned an unexpected result: {source}"))
        })
    }
}

/// Separate a contract revert from other node-reported errors.
fn classify_rpc_error(error: JsonRpcError) -> LedgerError {
    let lowered = error.message.to_ascii_lowercase();

    if lowered.contains("execution reverted") || lowered.contains("revert") {
        return LedgerError::TransactionReverted(error.message);
    }

    LedgerError::Rpc {
        code: error.code,
        message: error.message,
    }
}

/// Parse a `0x`-prefixed hex quantity or plain decimal digits into a wei
/// value.
pub(crate) fn parse_wei(value: &str) -> Result<u128, LedgerError> {
    let value = value.trim();

    let parsed = if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u128::from_str_radix(hex, 16)
    } else {
        value.parse()
    };

    parsed.map_err(|_source| LedgerError::Protocol(format!("invalid quantity {value:?}")))
}

/// Parse a hex or decimal quantity that must fit in a `u64` (gas, block
/// numbers).
pub(crate) fn parse_quantity(value: &str) -> Result<u64, LedgerError> {
    let wei = parse_wei(value)?;

    u64::try_from(wei).map_err(|_source| LedgerError::Protocol(format!("quantity {value:?} too large")))
}

/// Format a wei value as a `0x`-prefixed hex quantity.
pub(crate) fn to_hex(value: u128) -> String {
    format!("0x{value:x}")
}
