//! Meeting Provider Config

use clap::Args;
use zeroize::Zeroizing;

use slotmint_app::meetings::MeetingProviderConfig;

/// Meeting provider account settings.
#[derive(Debug, Args)]
pub struct MeetingProviderApiConfig {
    /// OAuth base URL of the meeting provider
    #[arg(long, env = "MEETING_AUTH_BASE_URL", default_value = "https://zoom.us")]
    pub auth_base_url: String,

    /// REST API base URL of the meeting provider
    #[arg(
        long,
        env = "MEETING_API_BASE_URL",
        default_value = "https://api.zoom.us/v2"
    )]
    pub api_base_url: String,

    /// Provider account id for the client-credentials grant
    #[arg(long, env = "MEETING_ACCOUNT_ID")]
    pub account_id: String,

    /// OAuth client id
    #[arg(long, env = "MEETING_CLIENT_ID")]
    pub client_id: String,

    /// OAuth client secret
    #[arg(long, env = "MEETING_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,
}

impl From<MeetingProviderApiConfig> for MeetingProviderConfig {
    fn from(config: MeetingProviderApiConfig) -> Self {
        MeetingProviderConfig {
            auth_base_url: config.auth_base_url,
            api_base_url: config.api_base_url,
            account_id: config.account_id,
            client_id: config.client_id,
            client_secret: Zeroizing::new(config.client_secret),
        }
    }
}
