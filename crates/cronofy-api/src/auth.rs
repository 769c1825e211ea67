//! Request header construction.

use std::fmt;

/// Content type sent with every POST and DELETE body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: &'static str,
    pub value: String,
}

impl Header {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// The credential a request is authenticated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthContext<'a> {
    /// The account's OAuth access token. With no token the request goes out
    /// without an `Authorization` header.
    BearerToken(Option<&'a str>),
    /// The application's client secret, for endpoints authenticated as the
    /// application rather than an account.
    ApiKey(&'a str),
}

impl AuthContext<'_> {
    fn bearer(&self) -> Option<&str> {
        match self {
            Self::BearerToken(token) => *token,
            Self::ApiKey(secret) => Some(secret),
        }
    }
}

/// Builds the headers for a request.
///
/// The order is fixed: `Authorization` (when there is a credential), `Host`,
/// then `Content-Type` when `include_content` is set.
pub fn build_headers(auth: AuthContext<'_>, host: &str, include_content: bool) -> Vec<Header> {
    let mut headers = Vec::with_capacity(3);
    if let Some(token) = auth.bearer() {
        headers.push(Header::new("Authorization", format!("Bearer {token}")));
    }
    headers.push(Header::new("Host", host));
    if include_content {
        headers.push(Header::new("Content-Type", JSON_CONTENT_TYPE));
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(headers: &[Header]) -> String {
        headers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn bearer_with_content_headers() {
        let headers = build_headers(AuthContext::BearerToken(Some("T")), "api.cronofy.com", true);
        insta::assert_snapshot!(render(&headers), @r"
        Authorization: Bearer T
        Host: api.cronofy.com
        Content-Type: application/json; charset=utf-8
        ");
    }

    #[test]
    fn bearer_without_token_omits_authorization() {
        let headers = build_headers(AuthContext::BearerToken(None), "api.cronofy.com", false);
        assert_eq!(headers, vec![Header::new("Host", "api.cronofy.com")]);
    }

    #[test]
    fn api_key_always_authorizes() {
        let headers = build_headers(AuthContext::ApiKey("secret"), "api-de.cronofy.com", false);
        insta::assert_snapshot!(render(&headers), @r"
        Authorization: Bearer secret
        Host: api-de.cronofy.com
        ");
    }
}
