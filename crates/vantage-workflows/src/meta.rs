//! Typed result wrappers pairing parsed workflow resources with the client
//! that fetched them, enabling further chained operations.

use crate::models::{StageModel, StageType, WorkflowModel};
use crate::ops::get_workflow;
use crate::query::StageQuery;
use crate::Result;
use vantage_core::uuid::{StageUuid, WorkflowUuid};
use vantage_core::Client;

/// A workflow together with the client it was fetched through.
#[derive(Debug, Clone)]
pub struct Workflow {
    client: Client,
    item: WorkflowModel,
}

impl Workflow {
    /// Wrap a parsed workflow.
    #[must_use]
    pub fn new(client: Client, item: WorkflowModel) -> Self {
        Self { client, item }
    }

    /// Workflow id.
    #[must_use]
    pub fn id(&self) -> WorkflowUuid {
        self.item.id
    }

    /// Workflow name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.item.name
    }

    /// The underlying parsed model.
    #[must_use]
    pub fn model(&self) -> &WorkflowModel {
        &self.item
    }

    /// Unwrap into the parsed model.
    #[must_use]
    pub fn into_model(self) -> WorkflowModel {
        self.item
    }

    /// Query over this workflow's stages.
    #[must_use]
    pub fn stages(&self) -> StageQuery {
        StageQuery::new(self.client.clone(), self.id())
    }
}

/// A workflow stage together with the client and the owning workflow id.
#[derive(Debug, Clone)]
pub struct Stage {
    client: Client,
    workflow_id: WorkflowUuid,
    item: StageModel,
}

impl Stage {
    /// Wrap a parsed stage.
    #[must_use]
    pub fn new(client: Client, workflow_id: WorkflowUuid, item: StageModel) -> Self {
        Self {
            client,
            workflow_id,
            item,
        }
    }

    /// Stage id.
    #[must_use]
    pub fn id(&self) -> StageUuid {
        self.item.id
    }

    /// Stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.item.name
    }

    /// Stage behavior kind.
    #[must_use]
    pub fn stage_type(&self) -> StageType {
        self.item.stage_type
    }

    /// Id of the workflow this stage belongs to.
    #[must_use]
    pub fn workflow_id(&self) -> WorkflowUuid {
        self.workflow_id
    }

    /// The underlying parsed model.
    #[must_use]
    pub fn model(&self) -> &StageModel {
        &self.item
    }

    /// Fetch the workflow this stage belongs to.
    ///
    /// # Errors
    ///
    /// Propagates team resolution and transport/parse errors.
    pub async fn workflow(&self, team_slug: Option<&str>) -> Result<Workflow> {
        let model = get_workflow(&self.client, self.workflow_id, team_slug).await?;
        Ok(Workflow::new(self.client.clone(), model))
    }
}
