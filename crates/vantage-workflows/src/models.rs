//! Workflow and stage data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use vantage_core::query::{lookup_field, Filterable};
use vantage_core::uuid::{StageTemplateUuid, StageUuid, WorkflowUuid};

/// Behavior kind of a workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageType {
    /// Items are presented for annotation.
    Annotate,
    /// Annotations are reviewed and approved or rejected.
    Review,
    /// Terminal stage; items are done.
    Complete,
}

impl StageType {
    /// All stage types, in pipeline order.
    pub const ALL: [Self; 3] = [Self::Annotate, Self::Review, Self::Complete];

    /// Wire representation of the stage type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annotate => "annotate",
            Self::Review => "review",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed connection between two stages of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEdge {
    /// Optional edge label (e.g. "approve", "reject").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stage the edge leaves from.
    pub source_stage_id: StageUuid,

    /// Stage the edge leads to.
    pub target_stage_id: StageUuid,
}

/// One stage of a workflow as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageModel {
    /// Stage UUID.
    pub id: StageUuid,

    /// Human-readable stage name.
    pub name: String,

    /// Behavior kind.
    #[serde(rename = "type")]
    pub stage_type: StageType,

    /// Template this stage was instantiated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<StageTemplateUuid>,

    /// User ids allowed to pick up items in this stage.
    #[serde(default)]
    pub assignable_users: Vec<u64>,

    /// Outgoing/incoming connections.
    #[serde(default)]
    pub edges: Vec<StageEdge>,
}

impl Filterable for StageModel {
    fn field(&self, name: &str) -> Option<serde_json::Value> {
        lookup_field(self, name)
    }
}

/// A workflow as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowModel {
    /// Workflow UUID.
    pub id: WorkflowUuid,

    /// Human-readable workflow name.
    pub name: String,

    /// Stages in pipeline order.
    #[serde(default)]
    pub stages: Vec<StageModel>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_at: Option<DateTime<Utc>>,

    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Filterable for WorkflowModel {
    fn field(&self, name: &str) -> Option<serde_json::Value> {
        lookup_field(self, name)
    }
}
