//! Meeting gateway models.

use jiff::Timestamp;

/// A scheduled meeting to create with the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeeting {
    /// Meeting topic, 1 to 200 characters.
    pub topic: String,

    /// Absolute start instant.
    pub start_time: Timestamp,

    /// Duration in minutes, 1 to 1440.
    pub duration_minutes: u16,
}

/// A meeting as the provider records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    /// Provider-assigned meeting id, treated as opaque.
    pub id: String,

    /// Meeting topic.
    pub topic: String,

    /// URL participants join through.
    pub join_url: String,

    /// URL the host starts the meeting through.
    pub start_url: String,

    /// Scheduled start instant.
    pub start_time: Timestamp,

    /// Duration in minutes.
    pub duration_minutes: u16,
}
