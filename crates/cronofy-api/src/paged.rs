//! Lazy iteration over multi-page list responses.
//!
//! List endpoints answer with an items array under a resource-specific key
//! and, when more results exist, an absolute `pages.next_page` URL:
//!
//! ```json
//! { "pages": { "current": 1, "total": 2, "next_page": "https://..." },
//!   "events": [ ... ] }
//! ```
//!
//! The first page is fetched when the listing is created. Later pages are
//! fetched one at a time as the cursor runs past the items it holds.

use std::iter::FusedIterator;
use std::vec;

use serde_json::Value;
use tracing::debug;

use crate::auth::Header;
use crate::error::{CronofyError, CronofyResult};
use crate::pipeline::RequestPipeline;
use crate::response::Payload;
use crate::transport::Transport;

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    items: Vec<Value>,
    next_page: Option<String>,
}

impl Page {
    /// Extracts the items under `items_key` and the next page link.
    pub fn from_payload(payload: Payload, items_key: &str) -> CronofyResult<Self> {
        let malformed = || CronofyError::MalformedPage {
            items_key: items_key.to_string(),
        };
        let Payload::Json(Value::Object(mut object)) = payload else {
            return Err(malformed());
        };
        let items = match object.remove(items_key) {
            Some(Value::Array(items)) => items,
            _ => return Err(malformed()),
        };
        let next_page = object
            .get("pages")
            .and_then(|pages| pages.get("next_page"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self { items, next_page })
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }
}

/// A listing whose first page has been fetched.
///
/// Iterate it with [`iter`](Self::iter) or a `for` loop over a reference.
/// Every pass replays the held first page and fetches pages 2..N again.
#[derive(Debug)]
pub struct PagedResultIterator<'a, T> {
    pipeline: &'a RequestPipeline<T>,
    items_key: String,
    headers: Vec<Header>,
    url: String,
    query: String,
    first_page: Page,
}

impl<'a, T: Transport> PagedResultIterator<'a, T> {
    pub(crate) fn new(
        pipeline: &'a RequestPipeline<T>,
        items_key: &str,
        headers: Vec<Header>,
        url: String,
        query: String,
    ) -> CronofyResult<Self> {
        let payload = pipeline.get_page(&url, &headers, &query)?;
        let first_page = Page::from_payload(payload, items_key)?;
        Ok(Self {
            pipeline,
            items_key: items_key.to_string(),
            headers,
            url,
            query,
            first_page,
        })
    }

    pub fn items_key(&self) -> &str {
        &self.items_key
    }

    /// URL of the first page, without its query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query string of the first page (empty or starting with `?`).
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn first_page(&self) -> &Page {
        &self.first_page
    }

    /// Returns a cursor over every item of every page.
    pub fn iter(&self) -> PagedItems<'_, T> {
        PagedItems {
            pipeline: self.pipeline,
            items_key: &self.items_key,
            headers: &self.headers,
            current: self.first_page.items.clone().into_iter(),
            next_page: self.first_page.next_page.clone(),
            finished: false,
        }
    }

    /// Walks every page and collects the items, stopping at the first error.
    pub fn collect_all(&self) -> CronofyResult<Vec<Value>> {
        self.iter().collect()
    }
}

impl<'p, T: Transport> IntoIterator for &'p PagedResultIterator<'_, T> {
    type Item = CronofyResult<Value>;
    type IntoIter = PagedItems<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only cursor over a paged listing.
///
/// Yields buffered items until the current page is exhausted, then fetches
/// the next page. A failed fetch is yielded once as an `Err`, after which
/// the cursor is finished.
#[derive(Debug)]
pub struct PagedItems<'p, T> {
    pipeline: &'p RequestPipeline<T>,
    items_key: &'p str,
    headers: &'p [Header],
    current: vec::IntoIter<Value>,
    next_page: Option<String>,
    finished: bool,
}

impl<T: Transport> PagedItems<'_, T> {
    fn fetch(&self, url: &str) -> CronofyResult<Page> {
        debug!(items_key = self.items_key, %url, "following next page");
        let payload = self.pipeline.get_page(url, self.headers, "")?;
        Page::from_payload(payload, self.items_key)
    }
}

impl<T: Transport> Iterator for PagedItems<'_, T> {
    type Item = CronofyResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }
            if let Some(item) = self.current.next() {
                return Some(Ok(item));
            }
            let Some(url) = self.next_page.take() else {
                self.finished = true;
                return None;
            };
            match self.fetch(&url) {
                Ok(page) => {
                    self.current = page.items.into_iter();
                    self.next_page = page.next_page;
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<T: Transport> FusedIterator for PagedItems<'_, T> {}
