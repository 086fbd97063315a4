use clap::{Args, Subcommand};

use slotmint::{ChainAddress, SlotRef};
use slotmint_app::ledger::{LedgerConfig, LedgerGateway, RpcLedgerClient};

#[derive(Debug, Args)]
pub(crate) struct SlotCommand {
    #[command(subcommand)]
    command: SlotSubcommand,
}

#[derive(Debug, Subcommand)]
enum SlotSubcommand {
    /// Look up a slot by id or booking key
    Info(InfoArgs),

    /// Read the listed price of a slot
    Price(PriceArgs),
}

#[derive(Debug, Args)]
struct LedgerArgs {
    /// JSON-RPC endpoint of the ledger node
    #[arg(long, env = "LEDGER_RPC_URL")]
    rpc_url: String,

    /// Address of the slot contract
    #[arg(long, env = "CONTRACT_ADDRESS")]
    contract_address: ChainAddress,

    /// Address of the signing account
    #[arg(long, env = "SIGNER_ADDRESS")]
    signer_address: ChainAddress,
}

impl LedgerArgs {
    fn client(self) -> RpcLedgerClient {
        RpcLedgerClient::new(LedgerConfig::new(
            self.rpc_url,
            self.contract_address,
            self.signer_address,
        ))
    }
}

#[derive(Debug, Args)]
struct InfoArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Slot id or booking key
    reference: String,
}

#[derive(Debug, Args)]
struct PriceArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Slot id
    slot_id: u64,
}

pub(crate) async fn run(command: SlotCommand) -> Result<(), String> {
    match command.command {
        SlotSubcommand::Info(args) => info(args).await,
        SlotSubcommand::Price(args) => price(args).await,
    }
}

async fn info(args: InfoArgs) -> Result<(), String> {
    let reference =
        SlotRef::parse(&args.reference).map_err(|error| format!("invalid reference: {error}"))?;

    let slot = args
        .ledger
        .client()
        .slot_info(&reference)
        .await
        .map_err(|error| format!("failed to look up slot: {error}"))?;

    let Some(slot) = slot else {
        println!("no slot found for {reference}");
        return Ok(());
    };

    println!("slot_id: {}", slot.slot_id);
    println!("date: {}", slot.date);
    println!("time: {}", slot.time);
    println!("price: {} ETH", slot.price);
    println!("owner: {}", slot.owner);
    println!("booked: {}", slot.is_booked);
    println!(
        "booked_by: {}",
        slot.booked_by
            .map_or_else(|| "none".to_string(), |address| address.to_string())
    );
    println!("payment_released: {}", slot.payment_released);
    println!("meeting_id: {}", slot.meeting_id);
    println!("join_url: {}", slot.join_url);

    Ok(())
}

async fn price(args: PriceArgs) -> Result<(), String> {
    let price = args
        .ledger
        .client()
        .slot_price(args.slot_id)
        .await
        .map_err(|error| format!("failed to read price: {error}"))?;

    println!("{price} ETH");

    Ok(())
}
