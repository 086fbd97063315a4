//! Wire records from the ledger node and their normalization.

use serde::Deserialize;
use serde_json::Value;

use slotmint::{ChainAddress, EthAmount, Slot, SlotDate, SlotTime};

use crate::ledger::errors::LedgerError;
use crate::ledger::rpc::{parse_quantity, parse_wei};

/// A slot record exactly as the node returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSlot {
    pub slot_id: u64,
    pub date: String,
    pub time: String,
    /// Price in wei, as a hex or decimal quantity string.
    pub price: String,
    pub owner: String,
    pub booked_by: String,
    pub booked: bool,
    #[serde(default)]
    pub payment_released: bool,
    pub meeting_id: String,
    pub join_url: String,
}

/// The single place the node's slot schema becomes the canonical [`Slot`].
///
/// A record with the zero owner and zero price is the ledger's encoding of
/// "never existed" and maps to `None`. Anything else must carry coherent
/// fields or the whole lookup fails with [`LedgerError::MalformedRecord`];
/// no field aliases are probed.
pub(crate) fn normalize(wire: WireSlot) -> Result<Option<Slot>, LedgerError> {
    let price_wei = parse_wei(&wire.price)
        .map_err(|_source| malformed(wire.slot_id, "price is not a quantity"))?;

    let owner = ChainAddress::parse(&wire.owner)
        .map_err(|_source| malformed(wire.slot_id, "owner is not an address"))?;

    if owner.is_zero() && price_wei == 0 {
        return Ok(None);
    }

    let date = SlotDate::parse(&wire.date)
        .map_err(|_source| malformed(wire.slot_id, "date is not YYYY-MM-DD"))?;

    let time = SlotTime::parse(&wire.time)
        .map_err(|_source| malformed(wire.slot_id, "time is not HH:MM"))?;

    let booked_by = match wire.booked_by.as_str() {
        "" => None,
        raw => {
            let address = ChainAddress::parse(raw)
                .map_err(|_source| malformed(wire.slot_id, "bookedBy is not an address"))?;

            (!address.is_zero()).then_some(address)
        }
    };

    if wire.booked != booked_by.is_some() {
        return Err(malformed(
            wire.slot_id,
            "booked flag disagrees with bookedBy",
        ));
    }

    Ok(Some(Slot {
        slot_id: wire.slot_id,
        date,
        time,
        price: EthAmount::from_wei(price_wei),
        owner,
        booked_by,
        is_booked: wire.booked,
        payment_released: wire.payment_released,
        meeting_id: wire.meeting_id,
        join_url: wire.join_url,
    }))
}

fn malformed(slot_id: u64, detail: &str) -> LedgerError {
    LedgerError::MalformedRecord(format!("slot {slot_id}: {detail}"))
}

/// A mined transaction receipt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireReceipt {
    pub status: String,
    pub block_number: String,
    #[serde(default)]
    pub events: Vec<WireEvent>,
}

/// A decoded contract event from a receipt.
#[derive(Debug, Deserialize)]
pub(crate) struct WireEvent {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Map<String, Value>,
}

impl WireReceipt {
    /// Whether the transaction executed successfully.
    pub(crate) fn succeeded(&self) -> bool {
        matches!(self.status.as_str(), "0x1" | "1")
    }

    /// The receipt's block number.
    pub(crate) fn block(&self) -> Result<u64, LedgerError> {
        parse_quantity(&self.block_number)
    }

    /// The first argument `key` of the first event named `event`.
    pub(crate) fn event_arg(&self, event: &str, key: &str) -> Option<&Value> {
        self.events
            .iter()
            .find(|candidate| candidate.name == event)
            .and_then(|found| found.args.get(key))
    }
}

/// Current fee data from the node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireFeeData {
    pub max_fee_per_gas: Option<String>,
    pub max_priority_fee_per_gas: Option<String>,
    pub gas_price: Option<String>,
}

impl WireFeeData {
    /// The per-gas price to cost transactions at: the max fee when the node
    /// reports one, the legacy gas price otherwise.
    pub(crate) fn effective_price(&self) -> Result<u128, LedgerError> {
        let raw = self
            .max_fee_per_gas
            .as_deref()
            .or(self.gas_price.as_deref())
            .ok_or(LedgerError::MissingFeeData)?;

        parse_wei(raw)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn wire(owner: &str, price: &str, booked: bool, booked_by: &str) -> WireSlot {
        WireSlot {
            slot_id: 7,
            date: "2099-01-01".to_owned(),
            time: "10:00".to_owned(),
            price: price.to_owned(),
            owner: owner.to_owned(),
            booked_by: booked_by.to_owned(),
            booked,
            payment_released: false,
            meeting_id: "88012345678".to_owned(),
            join_url: "https://meet.example/j/88012345678".to_owned(),
        }
    }

    const OWNER: &str = "0x00000000000000000000000000000000000000aa";
    const BUYER: &str = "0x00000000000000000000000000000000000000bb";
    const ZERO: &str = "0x0000000000000000000000000000000000000000";

    #[test]
    fn zero_record_normalizes_to_none() -> TestResult {
        let result = normalize(wire(ZERO, "0x0", false, ""))?;

        assert!(result.is_none());

        Ok(())
    }

    #[test]
    fn unbooked_record_normalizes() -> TestResult {
        let slot = normalize(wire(OWNER, "0x2386f26fc10000", false, ZERO))?
            .ok_or("expected a slot")?;

        assert_eq!(slot.slot_id, 7);
        assert_eq!(slot.price.to_wei(), 10_000_000_000_000_000);
        assert!(!slot.is_booked);
        assert_eq!(slot.booked_by, None);
        assert!(slot.booking_consistent());

        Ok(())
    }

    #[test]
    fn booked_record_carries_the_booker() -> TestResult {
        let slot =
            normalize(wire(OWNER, "0x2386f26fc10000", true, BUYER))?.ok_or("expected a slot")?;

        assert!(slot.is_booked);
        assert_eq!(slot.booked_by, Some(ChainAddress::parse(BUYER)?));
        assert!(slot.booking_consistent());

        Ok(())
    }

    #[test]
    fn booked_flag_without_booker_fails_loudly() {
        let result = normalize(wire(OWNER, "0x2386f26fc10000", true, ZERO));

        assert!(matches!(result, Err(LedgerError::MalformedRecord(_))));
    }

    #[test]
    fn booker_without_booked_flag_fails_loudly() {
        let result = normalize(wire(OWNER, "0x2386f26fc10000", false, BUYER));

        assert!(matches!(result, Err(LedgerError::MalformedRecord(_))));
    }

    #[test]
    fn mangled_date_fails_loudly() {
        let mut record = wire(OWNER, "0x2386f26fc10000", false, ZERO);
        record.date = "january first".to_owned();

        let result = normalize(record);

        assert!(matches!(result, Err(LedgerError::MalformedRecord(_))));
    }

    #[test]
    fn fee_data_prefers_max_fee() -> TestResult {
        let fees = WireFeeData {
            max_fee_per_gas: Some("0x10".to_owned()),
            max_priority_fee_per_gas: Some("0x1".to_owned()),
            gas_price: Some("0x20".to_owned()),
        };

        assert_eq!(fees.effective_price()?, 16);

        Ok(())
    }

    #[test]
    fn fee_data_falls_back_to_gas_price() -> TestResult {
        let fees = WireFeeData {
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            gas_price: Some("0x20".to_owned()),
        };

        assert_eq!(fees.effective_price()?, 32);

        Ok(())
    }

    #[test]
    fn fee_data_with_nothing_is_an_error() {
        let fees = WireFeeData {
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            gas_price: None,
        };

        assert!(matches!(
            fees.effective_price(),
            Err(LedgerError::MissingFeeData)
        ));
    }

    #[test]
    fn receipt_event_args_are_found_by_name() -> TestResult {
        let receipt: WireReceipt = serde_json::from_value(serde_json::json!({
            "status": "0x1",
            "blockNumber": "0x10",
            "events": [
                { "name": "Transfer", "args": { "from": ZERO } },
                { "name": "SlotMinted", "args": { "slotId": 12 } },
            ],
        }))?;

        assert!(receipt.succeeded());
        assert_eq!(receipt.block()?, 16);
        assert_eq!(
            receipt.event_arg("SlotMinted", "slotId").and_then(Value::as_u64),
            Some(12)
        );
        assert_eq!(receipt.event_arg("SlotBooked", "bookingKey"), None);

        Ok(())
    }
}
