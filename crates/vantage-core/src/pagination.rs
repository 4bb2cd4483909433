//! Pagination primitives: pages, page metadata, and cursors.
//!
//! Server collections are returned one [`Page`] at a time, linked by opaque
//! `next`/`previous` URLs. A [`Cursor`] walks that chain for one query;
//! [`drain`] drives a cursor to exhaustion in strict link order.

use crate::client::{normalize_endpoint, Client};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Pagination metadata attached to every fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDetail {
    /// Current absolute position in the collection.
    #[serde(default)]
    pub count: u32,

    /// URL of the next page; absent on the terminal page.
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page; absent on the first page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl PageDetail {
    /// Returns true when no further page follows this one.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

/// One fetched batch of results plus its pagination metadata.
///
/// The wire shape carries the metadata alongside the results:
/// `{"results": [...], "count": 0, "next": null, "previous": null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items at this page's position, in server order.
    pub results: Vec<T>,

    /// Position counter and adjacent-page links.
    #[serde(flatten)]
    pub detail: PageDetail,
}

/// Stateful driver that walks successive result pages for one query.
///
/// One concrete cursor exists per collection type; each decides how a raw
/// response becomes a [`Page`] of its items. A fresh cursor always starts
/// from its query's base endpoint.
#[cfg_attr(test, mockall::automock(type Item = serde_json::Value;))]
#[async_trait]
pub trait Cursor: Send {
    /// Resource type the cursor yields.
    type Item: Send;

    /// Fetch the page at the cursor's current coordinate.
    ///
    /// Issues exactly one request and does not advance the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] when the cursor is already
    /// exhausted, or any transport/parse error from the fetch.
    async fn execute(&self) -> Result<Page<Self::Item>>;

    /// Return the page at the current coordinate and advance to its `next`
    /// link, or `Ok(None)` once the chain is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates any transport/parse error from the fetch.
    async fn next_page(&mut self) -> Result<Option<Page<Self::Item>>>;
}

/// Drive a cursor to exhaustion, concatenating every page's results in
/// strict `next`-link order.
///
/// # Errors
///
/// A failed fetch aborts the whole drain; items gathered so far are
/// discarded.
pub async fn drain<C>(cursor: &mut C) -> Result<Vec<C::Item>>
where
    C: Cursor + ?Sized,
{
    let mut items = Vec::new();
    while let Some(page) = cursor.next_page().await? {
        items.extend(page.results);
    }
    Ok(items)
}

/// Generic cursor over endpoints that return the standard paged collection
/// shape.
#[derive(Debug)]
pub struct CollectionCursor<T> {
    client: Client,
    pending: Option<String>,
    detail: Option<PageDetail>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CollectionCursor<T> {
    /// Create a cursor positioned at the collection's base endpoint.
    #[must_use]
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            pending: Some(endpoint.into()),
            detail: None,
            _marker: PhantomData,
        }
    }

    /// Metadata of the most recently fetched page, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&PageDetail> {
        self.detail.as_ref()
    }

    /// Server `next` links may be absolute; strip the configured base URL so
    /// they re-enter the transport as relative endpoints.
    fn relativize(&self, link: &str) -> String {
        let relative = link
            .strip_prefix(self.client.config().base_url())
            .unwrap_or(link);
        normalize_endpoint(relative).to_string()
    }
}

#[async_trait]
impl<T> Cursor for CollectionCursor<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    type Item = T;

    async fn execute(&self) -> Result<Page<T>> {
        let endpoint = self
            .pending
            .as_deref()
            .ok_or_else(|| Error::InvalidEndpoint("cursor is exhausted".to_string()))?;

        let raw = self.client.get(endpoint).await?;
        serde_json::from_value(raw).map_err(|err| {
            Error::ParseError(format!("Failed to parse page from `{endpoint}`: {err}"))
        })
    }

    async fn next_page(&mut self) -> Result<Option<Page<T>>> {
        if self.pending.is_none() {
            return Ok(None);
        }

        let page = self.execute().await?;
        self.pending = page.detail.next.as_deref().map(|link| self.relativize(link));
        self.detail = Some(page.detail.clone());

        Ok(Some(page))
    }
}
