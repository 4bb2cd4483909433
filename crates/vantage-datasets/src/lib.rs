//! Dataset client surface for the Vantage API.
//!
//! Provides the dataset model, CRUD endpoint operations, the paged dataset
//! query, and the slug-validating service wrapper.

#![deny(missing_docs)]

pub mod meta;
pub mod models;
pub mod ops;
pub mod query;

pub use meta::DatasetMeta;
pub use models::Dataset;
pub use ops::{create_dataset, get_dataset, remove_dataset};
pub use query::DatasetQuery;

/// Convenient result alias that reuses the shared Vantage error type.
pub type Result<T> = vantage_core::Result<T>;
