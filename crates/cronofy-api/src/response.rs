//! Turning raw transport results into payloads or API errors.

use cronofy_core::is_success;
use serde_json::Value;

use crate::error::{ApiError, CronofyResult};

/// What the transport hands back: the body text and the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub body: String,
    pub status: u16,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status,
        }
    }
}

/// A decoded response body.
///
/// Bodies that are not valid JSON are kept verbatim as [`Payload::Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Decodes `body` as JSON, falling back to the raw text.
    pub fn decode(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Looks up a top-level field of a JSON object payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(key))
    }

    /// Converts the payload to a JSON value, wrapping text as a JSON string.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

/// Resolves a raw response: 2xx bodies become a [`Payload`], anything else an
/// [`ApiError`] carrying the decoded body.
pub fn resolve(response: RawResponse) -> CronofyResult<Payload> {
    let RawResponse { body, status } = response;
    let payload = Payload::decode(body);
    if is_success(status) {
        Ok(payload)
    } else {
        Err(ApiError::new(status, payload).into())
    }
}
