//! Client for the Cronofy calendar REST API.
//!
//! Every call flows through one pipeline:
//!
//! ```text
//!   resource method (Cronofy::get_account, ::read_events, ...)
//!          │  path + query / body + AuthContext
//!          ▼
//!   RequestPipeline ── compose_url ──► InvalidUrl
//!          │        ── build_headers
//!          ▼
//!      Transport  (HttpTransport, or your own)
//!          │  RawResponse { body, status }
//!          ▼
//!       resolve  ──► Payload::Json / Payload::Text
//!                ──► ApiError { status, reason, details }
//! ```
//!
//! List endpoints return a [`PagedResultIterator`] seeded with the first page;
//! later pages are fetched as the items are consumed.
//!
//! # Example
//!
//! ```ignore
//! use cronofy_api::{ClientConfig, Cronofy, QueryParams};
//!
//! let config = ClientConfig::new("client_id", "client_secret").with_access_token("token");
//! let cronofy = Cronofy::new(config)?;
//! let account = cronofy.get_account()?;
//!
//! let query = QueryParams::new().scalar("tzid", "Europe/London");
//! for event in &cronofy.read_events(&query)? {
//!     println!("{}", event?["summary"]);
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod oauth;
pub mod paged;
pub mod params;
pub mod pipeline;
pub mod query;
pub mod response;
pub mod tokens;
pub mod transport;

#[cfg(test)]
mod mock;

pub use auth::{AuthContext, Header, build_headers};
pub use client::Cronofy;
pub use config::ClientConfig;
pub use cronofy_core::DataCenter;
pub use error::{
    ApiError, ApiErrorKind, CronofyError, CronofyResult, TransportError, TransportErrorKind,
};
pub use oauth::{AuthorizationParams, EnterpriseConnectParams};
pub use paged::{Page, PagedItems, PagedResultIterator};
pub use pipeline::RequestPipeline;
pub use query::{QueryParams, QueryValue, compose_url};
pub use response::{Payload, RawResponse, resolve};
pub use tokens::TokenExchange;
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{Transport, TransportResult};
