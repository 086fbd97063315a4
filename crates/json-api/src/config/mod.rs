//! Server configuration module

use clap::Parser;

use crate::config::{
    ledger::LedgerNodeConfig,
    meetings::MeetingProviderApiConfig,
    observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod ledger;
pub(crate) mod meetings;
pub(crate) mod observability;
pub(crate) mod server;

/// Slotmint JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "slotmint-json", about = "Slotmint JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Ledger node and slot contract settings.
    #[command(flatten)]
    pub ledger: LedgerNodeConfig,

    /// Meeting provider settings.
    #[command(flatten)]
    pub meetings: MeetingProviderApiConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
