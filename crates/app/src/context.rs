//! App Context

use std::sync::Arc;

use crate::ledger::{LedgerConfig, LedgerGateway, RpcLedgerClient};
use crate::meetings::{HttpMeetingClient, MeetingProviderConfig, MeetingProvisioner};
use crate::slots::{LiveSlotsService, SlotsService};
use crate::verification::{LedgerVerificationService, VerificationService};

/// Wired services behind their trait seams, shared by the HTTP surface and
/// the CLI.
#[derive(Clone)]
pub struct AppContext {
    /// Mint, read, and book workflows.
    pub slots: Arc<dyn SlotsService>,

    /// Booking-key resolution.
    pub verification: Arc<dyn VerificationService>,

    /// Direct meeting reads.
    pub meetings: Arc<dyn MeetingProvisioner>,
}

impl AppContext {
    /// Build the application context from gateway configuration.
    #[must_use]
    pub fn from_configs(ledger: LedgerConfig, meetings: MeetingProviderConfig) -> Self {
        let ledger: Arc<dyn LedgerGateway> = Arc::new(RpcLedgerClient::new(ledger));
        let meetings: Arc<dyn MeetingProvisioner> = Arc::new(HttpMeetingClient::new(meetings));

        Self {
            slots: Arc::new(LiveSlotsService::new(
                Arc::clone(&meetings),
                Arc::clone(&ledger),
            )),
            verification: Arc::new(LedgerVerificationService::new(
                Arc::clone(&ledger),
                Arc::clone(&meetings),
            )),
            meetings,
        }
    }
}
