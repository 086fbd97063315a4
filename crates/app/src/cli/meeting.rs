use clap::{Args, Subcommand};
use zeroize::Zeroizing;

use slotmint_app::meetings::{HttpMeetingClient, MeetingProviderConfig, MeetingProvisioner};

#[derive(Debug, Args)]
pub(crate) struct MeetingCommand {
    #[command(subcommand)]
    command: MeetingSubcommand,
}

#[derive(Debug, Subcommand)]
enum MeetingSubcommand {
    /// Fetch a meeting by id
    Get(GetArgs),
}

#[derive(Debug, Args)]
struct GetArgs {
    /// OAuth base URL of the meeting provider
    #[arg(long, env = "MEETING_AUTH_BASE_URL", default_value = "https://zoom.us")]
    auth_base_url: String,

    /// REST API base URL of the meeting provider
    #[arg(
        long,
        env = "MEETING_API_BASE_URL",
        default_value = "https://api.zoom.us/v2"
    )]
    api_base_url: String,

    /// Provider account id
    #[arg(long, env = "MEETING_ACCOUNT_ID")]
    account_id: String,

    /// OAuth client id
    #[arg(long, env = "MEETING_CLIENT_ID")]
    client_id: String,

    /// OAuth client secret
    #[arg(long, env = "MEETING_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Meeting id
    meeting_id: String,
}

pub(crate) async fn run(command: MeetingCommand) -> Result<(), String> {
    match command.command {
        MeetingSubcommand::Get(args) => get(args).await,
    }
}

async fn get(args: GetArgs) -> Result<(), String> {
    let client = HttpMeetingClient::new(MeetingProviderConfig {
        auth_base_url: args.auth_base_url,
        api_base_url: args.api_base_url,
        account_id: args.account_id,
        client_id: args.client_id,
        client_secret: Zeroizing::new(args.client_secret),
    });

    let meeting = client
        .fetch_meeting(&args.meeting_id)
        .await
        .map_err(|error| format!("failed to fetch meeting: {error}"))?;

    println!("id: {}", meeting.id);
    println!("topic: {}", meeting.topic);
    println!("start_time: {}", meeting.start_time);
    println!("duration_minutes: {}", meeting.duration_minutes);
    println!("join_url: {}", meeting.join_url);
    println!("start_url: {}", meeting.start_url);

    Ok(())
}
