//! Meeting provisioner seam.

use async_trait::async_trait;
use mockall::automock;

use crate::meetings::errors::MeetingError;
use crate::meetings::models::{Meeting, NewMeeting};

/// Creates and fetches meetings with the external provider.
///
/// Creation schedules a real meeting and is not idempotent; callers must not
/// blindly retry it. Fetching is a pure read.
#[automock]
#[async_trait]
pub trait MeetingProvisioner: Send + Sync {
    /// Create a scheduled meeting.
    async fn create_meeting(&self, meeting: NewMeeting) -> Result<Meeting, MeetingError>;

    /// Fetch an existing meeting by id.
    async fn fetch_meeting(&self, meeting_id: &str) -> Result<Meeting, MeetingError>;
}
