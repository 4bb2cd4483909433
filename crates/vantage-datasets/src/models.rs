//! Dataset data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vantage_core::query::{lookup_field, Filterable};

/// A dataset as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Numeric dataset id; absent on payloads that have not been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Human-readable dataset name.
    pub name: String,

    /// URL-safe dataset slug.
    pub slug: String,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_at: Option<DateTime<Utc>>,

    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Filterable for Dataset {
    fn field(&self, name: &str) -> Option<serde_json::Value> {
        lookup_field(self, name)
    }
}
