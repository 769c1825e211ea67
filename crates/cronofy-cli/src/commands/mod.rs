//! Subcommand implementations.

pub mod api;
pub mod auth;
pub mod config;

use std::io::Write;

use cronofy_api::Payload;
use serde_json::Value;

use crate::error::ClientResult;

/// Writes a response payload: JSON pretty-printed, text verbatim.
pub fn print_payload(out: &mut impl Write, payload: &Payload) -> ClientResult<()> {
    match payload {
        Payload::Json(value) => print_json(out, value),
        Payload::Text(text) => {
            writeln!(out, "{}", text)?;
            Ok(())
        }
    }
}

pub fn print_json(out: &mut impl Write, value: &Value) -> ClientResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        crate::error::ClientError::Config(format!("failed to render JSON: {}", e))
    })?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for command tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use cronofy_api::{Header, RawResponse, Transport, TransportError, TransportResult};

    #[derive(Default)]
    pub struct ScriptedTransport {
        replies: RefCell<VecDeque<TransportResult>>,
        pub urls: RefCell<Vec<String>>,
        pub bodies: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        pub fn reply(self, status: u16, body: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Ok(RawResponse::new(status, body)));
            self
        }

        fn next(&self, url: &str, body: &str) -> TransportResult {
            self.urls.borrow_mut().push(url.to_string());
            self.bodies.borrow_mut().push(body.to_string());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::request("no scripted reply")))
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, url: &str, _headers: &[Header]) -> TransportResult {
            self.next(url, "")
        }

        fn post(&self, url: &str, body: &str, _headers: &[Header]) -> TransportResult {
            self.next(url, body)
        }

        fn delete(&self, url: &str, body: &str, _headers: &[Header]) -> TransportResult {
            self.next(url, body)
        }
    }
}
