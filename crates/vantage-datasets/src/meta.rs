//! Dataset service wrapper combining the endpoint operations with slug
//! validation and query construction.

use crate::models::Dataset;
use crate::ops::{create_dataset, get_dataset, remove_dataset};
use crate::query::DatasetQuery;
use crate::Result;
use vantage_core::slug::validate_slug;
use vantage_core::{Client, Error};

/// Entry point for dataset operations on one client.
#[derive(Debug, Clone)]
pub struct DatasetMeta {
    client: Client,
}

impl DatasetMeta {
    /// Create the wrapper for a client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Query over every visible dataset.
    #[must_use]
    pub fn datasets(&self) -> DatasetQuery {
        DatasetQuery::new(self.client.clone())
    }

    /// Create a dataset after validating the slug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSlug`] before any network call when the slug
    /// is malformed; otherwise propagates the create operation's errors.
    pub async fn create_dataset(&self, slug: &str) -> Result<Dataset> {
        let slug = validate_slug(slug)?;
        create_dataset(&self.client, &slug).await
    }

    /// Fetch a dataset by slug.
    ///
    /// # Errors
    ///
    /// Propagates the underlying operation's errors.
    pub async fn get_dataset(&self, slug: &str) -> Result<Dataset> {
        get_dataset(&self.client, slug).await
    }

    /// Delete a dataset by numeric id, returning the archived id.
    ///
    /// # Errors
    ///
    /// Propagates the underlying operation's errors.
    pub async fn delete_dataset_by_id(&self, id: u64) -> Result<u64> {
        remove_dataset(&self.client, id).await
    }

    /// Delete a dataset by slug: resolves the dataset first, then archives
    /// it by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the slug resolves to a dataset
    /// without an id or to no dataset at all.
    pub async fn delete_dataset_by_slug(&self, slug: &str) -> Result<u64> {
        let dataset = get_dataset(&self.client, slug).await?;
        let id = dataset
            .id
            .ok_or_else(|| Error::NotFound(format!("dataset `{slug}` has no id")))?;
        remove_dataset(&self.client, id).await
    }
}
