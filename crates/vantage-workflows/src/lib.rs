//! Workflow client surface for the Vantage API.
//!
//! Provides typed workflow and stage models, endpoint operations, and the
//! lazily-evaluated queries and result wrappers built on `vantage-core`.

#![deny(missing_docs)]

pub mod meta;
pub mod models;
pub mod ops;
pub mod query;

pub use meta::{Stage, Workflow};
pub use models::{StageEdge, StageModel, StageType, WorkflowModel};
pub use ops::{get_workflow, list_workflows};
pub use query::{StageCursor, StageQuery, WorkflowQuery};

/// Convenient result alias that reuses the shared Vantage error type.
pub type Result<T> = vantage_core::Result<T>;
