//! Scripted transport for unit tests.
//!
//! Replies are queued up front and handed out in order; every call is
//! recorded so tests can assert on the exact URL, headers and body sent.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use crate::auth::Header;
use crate::error::TransportError;
use crate::response::RawResponse;
use crate::transport::{Transport, TransportResult};

/// A request as the transport saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    /// Query string passed to `get_page`, if the call went through it.
    pub query: Option<String>,
    pub body: Option<String>,
    pub headers: Vec<Header>,
}

impl RecordedRequest {
    /// Decodes the recorded body as JSON.
    pub fn json_body(&self) -> Value {
        self.body
            .as_deref()
            .map(|b| serde_json::from_str(b).expect("recorded body is JSON"))
            .unwrap_or(Value::Null)
    }

    /// Renders headers as `Name: value` lines.
    pub fn header_lines(&self) -> Vec<String> {
        self.headers.iter().map(ToString::to_string).collect()
    }
}

#[derive(Debug, Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<TransportResult>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply with the given status and body.
    pub fn reply(self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(RawResponse::new(status, body)));
        self
    }

    /// Queues a 200 reply with a JSON body.
    pub fn reply_json(self, value: Value) -> Self {
        self.reply(200, value.to_string())
    }

    /// Queues a transport failure.
    pub fn fail(self, error: TransportError) -> Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    fn record(
        &self,
        method: &'static str,
        url: &str,
        query: Option<&str>,
        body: Option<&str>,
        headers: &[Header],
    ) -> TransportResult {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            url: url.to_string(),
            query: query.map(str::to_string),
            body: body.map(str::to_string),
            headers: headers.to_vec(),
        });
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {method} {url}"))
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, headers: &[Header]) -> TransportResult {
        self.record("GET", url, None, None, headers)
    }

    fn get_page(&self, url: &str, headers: &[Header], query: &str) -> TransportResult {
        self.record("GET", url, Some(query), None, headers)
    }

    fn post(&self, url: &str, body: &str, headers: &[Header]) -> TransportResult {
        self.record("POST", url, None, Some(body), headers)
    }

    fn delete(&self, url: &str, body: &str, headers: &[Header]) -> TransportResult {
        self.record("DELETE", url, None, Some(body), headers)
    }
}
