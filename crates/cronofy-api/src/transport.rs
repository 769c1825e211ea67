//! The network seam between the request pipeline and HTTP.
//!
//! [`Transport`] is the only place a request leaves the process. The default
//! implementation, [`HttpTransport`], is a blocking `reqwest` client; tests
//! substitute a scripted transport.

use crate::auth::Header;
use crate::error::TransportError;
use crate::response::RawResponse;

/// Result type returned by transports.
pub type TransportResult = Result<RawResponse, TransportError>;

/// Sends fully composed requests.
///
/// URLs are absolute and headers already carry authentication. Implementations
/// must not interpret the status code: non-2xx responses are returned as
/// [`RawResponse`]s, and only failures to complete the exchange are errors.
pub trait Transport {
    /// Sends a GET request.
    fn get(&self, url: &str, headers: &[Header]) -> TransportResult;

    /// Fetches one page of a list endpoint. `query` is either empty or a
    /// rendered query string starting with `?`.
    fn get_page(&self, url: &str, headers: &[Header], query: &str) -> TransportResult {
        self.get(&format!("{url}{query}"), headers)
    }

    /// Sends a POST request with a JSON body.
    fn post(&self, url: &str, body: &str, headers: &[Header]) -> TransportResult;

    /// Sends a DELETE request with a JSON body.
    fn delete(&self, url: &str, body: &str, headers: &[Header]) -> TransportResult;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, headers: &[Header]) -> TransportResult {
        (**self).get(url, headers)
    }

    fn get_page(&self, url: &str, headers: &[Header], query: &str) -> TransportResult {
        (**self).get_page(url, headers, query)
    }

    fn post(&self, url: &str, body: &str, headers: &[Header]) -> TransportResult {
        (**self).post(url, body, headers)
    }

    fn delete(&self, url: &str, body: &str, headers: &[Header]) -> TransportResult {
        (**self).delete(url, body, headers)
    }
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::{Client, RequestBuilder};

    use super::{Transport, TransportResult};
    use crate::auth::Header;
    use crate::error::TransportError;
    use crate::response::RawResponse;

    /// User agent sent with every request.
    pub const USER_AGENT: &str = concat!("cronofy-rs/", env!("CARGO_PKG_VERSION"));

    /// Blocking HTTP transport backed by `reqwest`.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        /// Creates a transport whose requests time out after `timeout`.
        pub fn new(timeout: Duration) -> Result<Self, TransportError> {
            let client = Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    TransportError::request(format!("failed to create HTTP client: {e}"))
                        .with_source(e)
                })?;
            Ok(Self { client })
        }

        /// Wraps an existing client.
        pub fn with_client(client: Client) -> Self {
            Self { client }
        }

        fn send(&self, request: RequestBuilder, headers: &[Header]) -> TransportResult {
            let request = headers
                .iter()
                .fold(request, |req, h| req.header(h.name, h.value.as_str()));

            let response = request.send().map_err(map_reqwest_error)?;
            let status = response.status().as_u16();
            let body = response.text().map_err(|e| {
                TransportError::body(format!("failed to read response body: {e}")).with_source(e)
            })?;
            Ok(RawResponse { body, status })
        }
    }

    impl Transport for HttpTransport {
        fn get(&self, url: &str, headers: &[Header]) -> TransportResult {
            self.send(self.client.get(url), headers)
        }

        fn post(&self, url: &str, body: &str, headers: &[Header]) -> TransportResult {
            self.send(self.client.post(url).body(body.to_string()), headers)
        }

        fn delete(&self, url: &str, body: &str, headers: &[Header]) -> TransportResult {
            self.send(self.client.delete(url).body(body.to_string()), headers)
        }
    }

    fn map_reqwest_error(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::timeout("request timeout").with_source(e)
        } else if e.is_connect() {
            TransportError::connect(e.to_string()).with_source(e)
        } else if e.is_body() || e.is_decode() {
            TransportError::body(e.to_string()).with_source(e)
        } else {
            TransportError::request(e.to_string()).with_source(e)
        }
    }

}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct EchoTransport {
        urls: RefCell<Vec<String>>,
    }

    impl Transport for EchoTransport {
        fn get(&self, url: &str, _headers: &[Header]) -> TransportResult {
            self.urls.borrow_mut().push(url.to_string());
            Ok(RawResponse::new(200, "{}"))
        }

        fn post(&self, url: &str, _body: &str, _headers: &[Header]) -> TransportResult {
            self.get(url, &[])
        }

        fn delete(&self, url: &str, _body: &str, _headers: &[Header]) -> TransportResult {
            self.get(url, &[])
        }
    }

    #[test]
    fn default_get_page_appends_query() {
        let transport = EchoTransport::default();
        transport
            .get_page("https://api.cronofy.com/v1/events", &[], "?tzid=Etc%2FUTC")
            .unwrap();
        transport
            .get_page("https://api.cronofy.com/v1/events/pages/2", &[], "")
            .unwrap();
        assert_eq!(
            *transport.urls.borrow(),
            vec![
                "https://api.cronofy.com/v1/events?tzid=Etc%2FUTC".to_string(),
                "https://api.cronofy.com/v1/events/pages/2".to_string(),
            ]
        );
    }

    #[test]
    fn references_are_transports() {
        fn fetch(t: impl Transport) -> TransportResult {
            t.get("https://api.cronofy.com/v1/account", &[])
        }
        let transport = EchoTransport::default();
        fetch(&transport).unwrap();
        assert_eq!(transport.urls.borrow().len(), 1);
    }
}
