//! Lazily-evaluated query over the dataset collection.

use crate::models::Dataset;
use crate::Result;
use vantage_core::pagination::{drain, CollectionCursor};
use vantage_core::query::{apply_predicates, Predicate};
use vantage_core::Client;

const DATASETS_ENDPOINT: &str = "datasets";

/// Query over every dataset visible to the authenticated user.
///
/// Chaining performs no I/O; each [`collect`] drives a fresh cursor through
/// the paged collection and filters locally.
///
/// [`collect`]: DatasetQuery::collect
#[derive(Debug, Clone)]
pub struct DatasetQuery {
    client: Client,
    predicates: Vec<Predicate>,
}

impl DatasetQuery {
    /// Create an unfiltered query.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_predicates(client, Vec::new())
    }

    /// Create a query seeded with initial predicates.
    #[must_use]
    pub fn with_predicates(client: Client, predicates: Vec<Predicate>) -> Self {
        Self { client, predicates }
    }

    /// Return a new query with the predicate appended, leaving the receiver
    /// untouched.
    #[must_use]
    pub fn filter(&self, predicate: Predicate) -> Self {
        let mut next = self.clone();
        next.predicates.push(predicate);
        next
    }

    /// Fetch every page, apply all predicates, and return the matches in
    /// fetch order.
    ///
    /// # Errors
    ///
    /// A failed page fetch aborts the whole collection.
    pub async fn collect(&self) -> Result<Vec<Dataset>> {
        let mut cursor: CollectionCursor<Dataset> =
            CollectionCursor::new(self.client.clone(), DATASETS_ENDPOINT);

        let datasets = drain(&mut cursor).await?;
        Ok(apply_predicates(datasets, &self.predicates))
    }
}
