//! Client error types.

use std::fmt;

use cronofy_api::CronofyError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The API call failed.
    Api(CronofyError),
    /// IO error.
    Io(std::io::Error),
    /// Authentication required.
    AuthRequired(String),
    /// Action failed (open browser, etc).
    Action(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Api(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::AuthRequired(msg) => write!(f, "authentication required: {}", msg),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<CronofyError> for ClientError {
    fn from(err: CronofyError) -> Self {
        Self::Api(err)
    }
}

#[cfg(test)]
mod tests {
    use cronofy_api::{ApiError, Payload};

    use super::*;

    #[test]
    fn display_messages() {
        let err = ClientError::Config("missing client_id".into());
        assert_eq!(err.to_string(), "configuration error: missing client_id");

        let api = ApiError::new(401, Payload::Text(String::new()));
        let err: ClientError = CronofyError::from(api).into();
        assert_eq!(err.to_string(), "API error: Unauthorized (401)");

        let err = ClientError::AuthRequired("run `cronofy auth token`".into());
        assert!(err.to_string().starts_with("authentication required"));
    }
}
