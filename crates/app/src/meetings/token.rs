//! Process-wide provider token cache.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::meetings::errors::MeetingError;

/// Tokens are treated as expired this long before the provider says so.
const EXPIRY_MARGIN: Duration = Duration::from_secs(300);

/// Cached access token with its computed expiry.
#[derive(Debug)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Single-owner cache for the provider access token.
///
/// The mutex is held across the refresh call, so concurrent callers that find
/// the token missing or expired share one in-flight refresh instead of each
/// hitting the token endpoint. A reader can never observe a token without its
/// expiry: both are written in one assignment under the lock.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, refreshing through `refresh` when it is
    /// missing or within the safety margin of expiry. `refresh` yields the
    /// token value and the provider-reported lifetime.
    pub(crate) async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<String, MeetingError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, Duration), MeetingError>>,
    {
        let mut guard = self.slot.lock().await;

        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.value.clone());
            }
        }

        let (value, lifetime) = refresh().await?;

        *guard = Some(CachedToken {
            value: value.clone(),
            expires_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        });

        Ok(value)
    }

    /// Drop the cached token so the next call re-authenticates. Called when
    /// the provider rejects a token mid-lifetime.
    pub(crate) async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
