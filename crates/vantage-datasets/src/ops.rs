//! Dataset endpoint operations.

use crate::models::Dataset;
use crate::Result;
use serde_json::json;
use tracing::debug;
use vantage_core::{Client, Error};

/// Create a dataset with the given name.
///
/// # Errors
///
/// Propagates transport errors; returns [`Error::ParseError`] when the
/// response is not a dataset.
pub async fn create_dataset(client: &Client, name: &str) -> Result<Dataset> {
    debug!(name, "creating dataset");
    let raw = client.post("datasets", &json!({ "name": name })).await?;
    serde_json::from_value(raw)
        .map_err(|err| Error::ParseError(format!("Failed to parse created dataset: {err}")))
}

/// Fetch a dataset by slug.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for unknown slugs, or any transport/parse
/// error.
pub async fn get_dataset(client: &Client, slug: &str) -> Result<Dataset> {
    let raw = client.get(&format!("datasets/{slug}")).await?;
    serde_json::from_value(raw)
        .map_err(|err| Error::ParseError(format!("Failed to parse dataset `{slug}`: {err}")))
}

/// Archive a dataset by id, returning the id the server confirmed.
///
/// # Errors
///
/// Propagates transport errors; returns [`Error::ParseError`] when the
/// response carries no id.
pub async fn remove_dataset(client: &Client, id: u64) -> Result<u64> {
    debug!(id, "archiving dataset");
    let raw = client
        .put(&format!("datasets/{id}/archive"), &json!({}))
        .await?;
    raw.get("id").and_then(serde_json::Value::as_u64).ok_or_else(|| {
        Error::ParseError(format!("Archive response for dataset `{id}` carries no id"))
    })
}
