//! HTTP client for the meeting provider.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use jiff::Timestamp;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use async_trait::async_trait;

use slotmint::ValidationError;

use crate::meetings::errors::MeetingError;
use crate::meetings::models::{Meeting, NewMeeting};
use crate::meetings::provisioner::MeetingProvisioner;
use crate::meetings::token::TokenCache;

const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);
const CREATE_TIMEOUT: Duration = Duration::from_secs(15);
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the meeting provider account.
#[derive(Debug, Clone)]
pub struct MeetingProviderConfig {
    /// OAuth base URL, e.g. `"https://zoom.us"`.
    pub auth_base_url: String,

    /// REST API base URL, e.g. `"https://api.zoom.us/v2"`.
    pub api_base_url: String,

    /// Provider account id for the client-credentials grant.
    pub account_id: String,

    /// OAuth client id.
    pub client_id: String,

    /// OAuth client secret.
    pub client_secret: Zeroizing<String>,
}

/// HTTP client for the meeting provider, with a process-wide token cache.
#[derive(Debug)]
pub struct HttpMeetingClient {
    config: MeetingProviderConfig,
    http: Client,
    token: TokenCache,
}

impl HttpMeetingClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: MeetingProviderConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            token: TokenCache::new(),
        }
    }

    /// A valid access token, refreshed through the cache when needed.
    async fn access_token(&self) -> Result<String, MeetingError> {
        self.token.get_or_refresh(|| self.request_token()).await
    }

    /// One round trip to the client-credentials token endpoint.
    async fn request_token(&self) -> Result<(String, Duration), MeetingError> {
        let url = format!("{}/oauth/token", self.config.auth_base_url);

        let basic = BASE64.encode(format!(
            "{}:{}",
            self.config.client_id,
            self.config.client_secret.as_str()
        ));

        let response = self
            .http
            .post(&url)
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.config.account_id.as_str()),
            ])
            .header(AUTHORIZATION, format!("Basic {basic}"))
            .timeout(TOKEN_TIMEOUT)
            .send()
            .await
            .map_err(MeetingError::from_transport)?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(MeetingError::Auth);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(MeetingError::Provider(format!(
                "token request failed with status {status}: {text}"
            )));
        }

        let parsed: TokenResponse = response.json().await.map_err(MeetingError::from_transport)?;

        Ok((parsed.access_token, Duration::from_secs(parsed.expires_in)))
    }

    /// Map a non-success meeting API status, invalidating the token cache on
    /// an auth rejection so the next call re-authenticates.
    async fn classify_status(&self, response: reqwest::Response) -> MeetingError {
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => {
                self.token.invalidate().await;

                MeetingError::Auth
            }
            StatusCode::NOT_FOUND => MeetingError::NotFound,
            StatusCode::TOO_MANY_REQUESTS => MeetingError::RateLimited,
            _ => {
                let text = response.text().await.unwrap_or_default();

                MeetingError::Provider(format!("unexpected status {status}: {text}"))
            }
        }
    }
}

#[async_trait]
impl MeetingProvisioner for HttpMeetingClient {
    async fn create_meeting(&self, meeting: NewMeeting) -> Result<Meeting, MeetingError> {
        let topic = meeting.topic.trim();

        if topic.is_empty() || topic.chars().count() > 200 {
            return Err(ValidationError::TopicLength.into());
        }

        if !(1..=1440).contains(&meeting.duration_minutes) {
            return Err(ValidationError::InvalidDuration.into());
        }

        let token = self.access_token().await?;
        let url = format!("{}/users/me/meetings", self.config.api_base_url);

        let body = CreateMeetingBody {
            topic,
            meeting_type: SCHEDULED_MEETING,
            start_time: meeting.start_time,
            duration: meeting.duration_minutes,
            timezone: "UTC",
            settings: MeetingSettings::default(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .timeout(CREATE_TIMEOUT)
            .send()
            .await
            .map_err(MeetingError::from_transport)?;

        if !response.status().is_success() {
            return Err(self.classify_status(response).await);
        }

        let parsed: MeetingResponse =
            response.json().await.map_err(MeetingError::from_transport)?;

        parsed.try_into()
    }

    async fn fetch_meeting(&self, meeting_id: &str) -> Result<Meeting, MeetingError> {
        let token = self.access_token().await?;
        let url = format!("{}/meetings/{meeting_id}", self.config.api_base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(MeetingError::from_transport)?;

        if !response.status().is_success() {
            return Err(self.classify_status(response).await);
        }

        let parsed: MeetingResponse =
            response.json().await.map_err(MeetingError::from_transport)?;

        parsed.try_into()
    }
}

/// Provider meeting type discriminator for a scheduled meeting.
const SCHEDULED_MEETING: u8 = 2;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Serialize)]
struct CreateMeetingBody<'a> {
    topic: &'a str,
    #[serde(rename = "type")]
    meeting_type: u8,
    start_time: Timestamp,
    duration: u16,
    timezone: &'a str,
    settings: MeetingSettings,
}

#[derive(Debug, Serialize)]
struct MeetingSettings {
    host_video: bool,
    participant_video: bool,
    join_before_host: bool,
    mute_upon_entry: bool,
    approval_type: u8,
    audio: &'static str,
    auto_recording: &'static str,
    waiting_room: bool,
    allow_multiple_devices: bool,
}

impl Default for MeetingSettings {
    fn default() -> Self {
        Self {
            host_video: true,
            participant_video: true,
            join_before_host: false,
            mute_upon_entry: true,
            approval_type: 0,
            audio: "both",
            auto_recording: "none",
            waiting_room: false,
            allow_multiple_devices: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MeetingResponse {
    id: u64,
    topic: String,
    join_url: String,
    start_url: String,
    start_time: Timestamp,
    duration: u16,
}

impl TryFrom<MeetingResponse> for Meeting {
    type Error = MeetingError;

    fn try_from(response: MeetingResponse) -> Result<Self, Self::Error> {
        if response.join_url.is_empty() {
            return Err(MeetingError::Provider(
                "meeting response missing join_url".to_owned(),
            ));
        }

        Ok(Meeting {
            id: response.id.to_string(),
            topic: response.topic,
            join_url: response.join_url,
            start_url: response.start_url,
            start_time: response.start_time,
            duration_minutes: response.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unroutable_client() -> HttpMeetingClient {
        HttpMeetingClient::new(MeetingProviderConfig {
            auth_base_url: "http://127.0.0.1:1".to_owned(),
            api_base_url: "http://127.0.0.1:1".to_owned(),
            account_id: "acct".to_owned(),
            client_id: "id".to_owned(),
            client_secret: Zeroizing::new("secret".to_owned()),
        })
    }

    fn meeting(topic: &str, duration_minutes: u16) -> NewMeeting {
        NewMeeting {
            topic: topic.to_owned(),
            start_time: Timestamp::UNIX_EPOCH,
            duration_minutes,
        }
    }

    #[tokio::test]
    async fn create_rejects_zero_duration_before_any_request() {
        let client = unroutable_client();

        let result = client.create_meeting(meeting("Standup", 0)).await;

        assert!(matches!(
            result,
            Err(MeetingError::Validation(ValidationError::InvalidDuration))
        ));
    }

    #[tokio::test]
    async fn create_rejects_oversized_topic_before_any_request() {
        let client = unroutable_client();

        let result = client.create_meeting(meeting(&"x".repeat(201), 30)).await;

        assert!(matches!(
            result,
            Err(MeetingError::Validation(ValidationError::TopicLength))
        ));
    }
}
