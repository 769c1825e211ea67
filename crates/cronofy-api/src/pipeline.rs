//! The single choke point every API call goes through.

use cronofy_core::DataCenter;
use serde::Serialize;
use tracing::{debug, trace};

use crate::auth::{AuthContext, Header, build_headers};
use crate::error::CronofyResult;
use crate::paged::PagedResultIterator;
use crate::query::{QueryParams, compose_url, validate_url};
use crate::response::{Payload, RawResponse, resolve};
use crate::transport::Transport;

/// Composes URLs, attaches headers, dispatches to the transport and resolves
/// the response.
///
/// The pipeline holds no credentials; every call is told how to
/// authenticate through an [`AuthContext`].
#[derive(Debug, Clone)]
pub struct RequestPipeline<T> {
    transport: T,
    api_root: String,
    host: String,
}

impl<T: Transport> RequestPipeline<T> {
    pub fn new(transport: T, api_root: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            transport,
            api_root: api_root.into(),
            host: host.into(),
        }
    }

    /// Creates a pipeline targeting the API of `data_center`.
    pub fn for_data_center(transport: T, data_center: &DataCenter) -> Self {
        Self::new(
            transport,
            data_center.api_root_url(),
            data_center.api_host(),
        )
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Builds the headers for a request against this pipeline's host.
    pub fn headers(&self, auth: AuthContext<'_>, with_content: bool) -> Vec<Header> {
        build_headers(auth, &self.host, with_content)
    }

    /// Sends a GET to `path` with `query` appended.
    pub fn get(
        &self,
        path: &str,
        auth: AuthContext<'_>,
        query: &QueryParams,
    ) -> CronofyResult<Payload> {
        let url = compose_url(&self.api_root, path, query)?;
        let headers = self.headers(auth, false);
        debug!(method = "GET", %url, "sending request");
        let response = self.transport.get(&url, &headers)?;
        Self::finish(response)
    }

    /// Sends a POST to `path` with `body` encoded as JSON.
    pub fn post<B>(&self, path: &str, auth: AuthContext<'_>, body: &B) -> CronofyResult<Payload>
    where
        B: Serialize + ?Sized,
    {
        let url = compose_url(&self.api_root, path, &QueryParams::new())?;
        let headers = self.headers(auth, true);
        let body = serde_json::to_string(body)?;
        debug!(method = "POST", %url, "sending request");
        let response = self.transport.post(&url, &body, &headers)?;
        Self::finish(response)
    }

    /// Sends a DELETE to `path`. The body is sent even though DELETE bodies
    /// are unusual; the API reads event identifiers from it.
    pub fn delete<B>(&self, path: &str, auth: AuthContext<'_>, body: &B) -> CronofyResult<Payload>
    where
        B: Serialize + ?Sized,
    {
        let url = compose_url(&self.api_root, path, &QueryParams::new())?;
        let headers = self.headers(auth, true);
        let body = serde_json::to_string(body)?;
        debug!(method = "DELETE", %url, "sending request");
        let response = self.transport.delete(&url, &body, &headers)?;
        Self::finish(response)
    }

    /// Fetches one page of a list endpoint from an absolute URL.
    pub fn get_page(&self, url: &str, headers: &[Header], query: &str) -> CronofyResult<Payload> {
        validate_url(&format!("{url}{query}"))?;
        debug!(method = "GET", %url, query, "fetching page");
        let response = self.transport.get_page(url, headers, query)?;
        Self::finish(response)
    }

    /// Starts a paged listing of `path`, fetching the first page now.
    pub fn paginate(
        &self,
        path: &str,
        auth: AuthContext<'_>,
        items_key: &str,
        query: &QueryParams,
    ) -> CronofyResult<PagedResultIterator<'_, T>> {
        let url = compose_url(&self.api_root, path, &QueryParams::new())?;
        let headers = self.headers(auth, false);
        PagedResultIterator::new(self, items_key, headers, url, query.to_query_string())
    }

    fn finish(response: RawResponse) -> CronofyResult<Payload> {
        trace!(status = response.status, "received response");
        resolve(response)
    }
}
