//! Error types for Cronofy API operations.
//!
//! Every public operation fails with exactly one [`CronofyError`]:
//!
//! - [`CronofyError::InvalidUrl`] - the composed URL is malformed; nothing was sent
//! - [`CronofyError::Transport`] - the network call itself failed
//! - [`CronofyError::Api`] - the API answered with a non-2xx status
//!
//! A 2xx response whose body is not JSON is *not* an error; it resolves to
//! [`Payload::Text`](crate::response::Payload::Text).

use std::fmt;

use cronofy_core::reason_phrase_or_unknown;
use thiserror::Error;

use crate::response::Payload;

/// Coarse classification of an API error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 401: the access token or client secret was rejected.
    Authentication,
    /// 403: the credentials lack the required scope or permission.
    Authorization,
    /// 404: the addressed resource does not exist.
    NotFound,
    /// 422: the request body failed validation.
    Validation,
    /// 429: the application is being rate limited.
    RateLimited,
    /// Any other 4xx.
    Client,
    /// 5xx.
    Server,
    /// Anything outside 4xx/5xx that is still not a success.
    Unexpected,
}

impl ApiErrorKind {
    /// Classifies a non-success status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::Authorization,
            404 => Self::NotFound,
            422 => Self::Validation,
            429 => Self::RateLimited,
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Unexpected,
        }
    }

    /// Returns a stable snake_case name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication_failed",
            Self::Authorization => "authorization_failed",
            Self::NotFound => "not_found",
            Self::Validation => "validation_failed",
            Self::RateLimited => "rate_limited",
            Self::Client => "client_error",
            Self::Server => "server_error",
            Self::Unexpected => "unexpected_status",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A non-2xx response from the API.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason} ({status})")]
pub struct ApiError {
    status: u16,
    reason: &'static str,
    details: Payload,
}

impl ApiError {
    /// Creates an API error for `status`, looking up its reason phrase.
    pub fn new(status: u16, details: Payload) -> Self {
        Self {
            status,
            reason: reason_phrase_or_unknown(status),
            details,
        }
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the reason phrase for the status code.
    pub fn reason(&self) -> &'static str {
        self.reason
    }

    /// Returns the error body, JSON-decoded when possible.
    pub fn details(&self) -> &Payload {
        &self.details
    }

    /// Consumes the error and returns its body.
    pub fn into_details(self) -> Payload {
        self.details
    }

    /// Returns the classification of the status code.
    pub fn kind(&self) -> ApiErrorKind {
        ApiErrorKind::from_status(self.status)
    }
}

/// The category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The connection (DNS, TCP or TLS) could not be established.
    Connect,
    /// The response body could not be read.
    Body,
    /// Any other failure while building or sending the request.
    Request,
}

impl TransportErrorKind {
    /// Returns a human-readable name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connection failed",
            Self::Body => "failed to read response",
            Self::Request => "request failed",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failure of the underlying network call.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error of the given kind.
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    /// Creates a connection error.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    /// Creates a body-read error.
    pub fn body(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Body, message)
    }

    /// Creates a generic request error.
    pub fn request(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Request, message)
    }

    /// Attaches the underlying error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the failure category.
    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Returns the transport's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An error returned by a Cronofy API operation.
#[derive(Debug, Error)]
pub enum CronofyError {
    /// The composed URL is not a well-formed absolute URL.
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The network call failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-2xx status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A list response did not carry an items array under the expected key.
    #[error("page has no `{items_key}` array")]
    MalformedPage { items_key: String },
}

impl CronofyError {
    /// Returns the API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        self.as_api().map(ApiError::status)
    }
}

/// A specialized Result type for Cronofy operations.
pub type CronofyResult<T> = Result<T, CronofyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_from_status() {
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::Authentication);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::Authorization);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(422), ApiErrorKind::Validation);
        assert_eq!(ApiErrorKind::from_status(429), ApiErrorKind::RateLimited);
        assert_eq!(ApiErrorKind::from_status(418), ApiErrorKind::Client);
        assert_eq!(ApiErrorKind::from_status(503), ApiErrorKind::Server);
        assert_eq!(ApiErrorKind::from_status(302), ApiErrorKind::Unexpected);
        assert_eq!(ApiErrorKind::RateLimited.as_str(), "rate_limited");
    }

    #[test]
    fn api_error_carries_reason_and_details() {
        let err = ApiError::new(422, Payload::Json(json!({"errors": {}})));
        assert_eq!(err.status(), 422);
        assert_eq!(err.reason(), "Unprocessable Entity");
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.details(), &Payload::Json(json!({"errors": {}})));
        assert_eq!(err.to_string(), "Unprocessable Entity (422)");
        assert_eq!(err.into_details(), Payload::Json(json!({"errors": {}})));
    }

    #[test]
    fn api_error_unknown_status_phrase() {
        let err = ApiError::new(429, Payload::Text(String::new()));
        assert_eq!(err.reason(), "Unknown Error");
        assert_eq!(err.to_string(), "Unknown Error (429)");
    }

    #[test]
    fn transport_error_display_and_source() {
        use std::error::Error;

        let err = TransportError::connect("dns lookup failed")
            .with_source(std::io::Error::other("no such host"));
        assert_eq!(err.kind(), TransportErrorKind::Connect);
        assert_eq!(err.message(), "dns lookup failed");
        assert_eq!(err.to_string(), "connection failed: dns lookup failed");
        assert!(err.source().is_some());
    }

    #[test]
    fn cronofy_error_accessors() {
        let err: CronofyError = ApiError::new(404, Payload::Text("gone".into())).into();
        assert_eq!(err.status(), Some(404));
        assert!(err.as_api().is_some());
        assert_eq!(err.to_string(), "API error: Not Found (404)");

        let err: CronofyError = TransportError::timeout("30s elapsed").into();
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "transport error: timeout: 30s elapsed");

        let err = CronofyError::InvalidUrl {
            url: "not a url".into(),
        };
        assert_eq!(err.to_string(), "invalid URL: not a url");
    }
}
