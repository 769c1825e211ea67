//! Outcome of the OAuth token-issuing calls.

use serde_json::Value;

use crate::response::Payload;

/// Result of a call that may issue credentials.
///
/// The API reports some refusals (an expired authorization code, a revoked
/// refresh token) with a 2xx status and an `error` field. Those come back as
/// [`TokenExchange::Denied`]; non-2xx statuses are still errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenExchange {
    /// Credentials were issued; holds the full response.
    Granted(Value),
    /// No access token in the response; holds its `error` field, or the whole
    /// response rendered as text when there is none.
    Denied(String),
}

impl TokenExchange {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    pub fn granted(&self) -> Option<&Value> {
        match self {
            Self::Granted(payload) => Some(payload),
            Self::Denied(_) => None,
        }
    }

    pub fn denial(&self) -> Option<&str> {
        match self {
            Self::Granted(_) => None,
            Self::Denied(reason) => Some(reason),
        }
    }

    /// Builds the denial for a payload that carried no access token.
    pub(crate) fn denied_from(payload: &Payload) -> Self {
        let reason = match payload.get("error") {
            Some(Value::String(error)) => error.clone(),
            Some(other) => other.to_string(),
            None => match payload {
                Payload::Json(value) => value.to_string(),
                Payload::Text(text) => text.clone(),
            },
        };
        Self::Denied(reason)
    }
}
