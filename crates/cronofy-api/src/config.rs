//! Client configuration and credential state.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use cronofy_core::DataCenter;
use serde_json::Value;

/// Credentials and endpoint selection for a [`Cronofy`](crate::Cronofy) client.
///
/// Token fields start out as supplied by the caller and are replaced whenever
/// a token exchange succeeds.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    data_center: DataCenter,
    client_id: String,
    client_secret: String,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    tokens: Option<Value>,
    token_expires_at: Option<DateTime<Utc>>,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_center: DataCenter::default(),
            client_id: String::new(),
            client_secret: String::new(),
            access_token: None,
            refresh_token: None,
            expires_in: None,
            tokens: None,
            token_expires_at: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration for an application's OAuth client.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    pub fn with_data_center(mut self, data_center: impl Into<DataCenter>) -> Self {
        self.data_center = data_center.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = non_empty(token.into());
        self
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = non_empty(token.into());
        self
    }

    /// Records the lifetime hint of the supplied access token.
    pub fn with_expires_in(mut self, seconds: i64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    /// Restores a previously computed expiry, e.g. from persisted state.
    pub fn with_token_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.token_expires_at = Some(expires_at);
        self
    }

    /// Sets the timeout used by the default HTTP transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn data_center(&self) -> &DataCenter {
        &self.data_center
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn expires_in(&self) -> Option<i64> {
        self.expires_in
    }

    /// The full payload of the last successful token exchange.
    pub fn tokens(&self) -> Option<&Value> {
        self.tokens.as_ref()
    }

    /// When the current access token expires, if it was issued by an
    /// exchange on this client.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.token_expires_at
    }

    /// Returns true once `now` is past [`token_expires_at`](Self::token_expires_at).
    pub fn is_token_expired(&self, now: DateTime<Utc>) -> bool {
        self.token_expires_at.is_some_and(|at| now >= at)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn api_root_url(&self) -> String {
        self.data_center.api_root_url()
    }

    pub fn app_root_url(&self) -> String {
        self.data_center.app_root_url()
    }

    pub fn host(&self) -> String {
        self.data_center.api_host()
    }

    /// Stores the credentials from a token-issuing response.
    ///
    /// Returns false, leaving the configuration untouched, when the payload
    /// carries no access token.
    pub(crate) fn apply_token_payload(&mut self, payload: &Value, now: DateTime<Utc>) -> bool {
        let Some(access_token) = payload
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
        else {
            return false;
        };

        self.access_token = Some(access_token.to_string());
        if let Some(refresh_token) = payload.get("refresh_token").and_then(Value::as_str) {
            self.refresh_token = Some(refresh_token.to_string());
        }
        self.expires_in = payload.get("expires_in").and_then(Value::as_i64);
        self.token_expires_at = self
            .expires_in
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime));
        self.tokens = Some(payload.clone());
        true
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
