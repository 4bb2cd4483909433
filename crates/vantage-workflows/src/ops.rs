//! Workflow endpoint operations.

use crate::models::WorkflowModel;
use crate::Result;
use tracing::debug;
use vantage_core::pagination::{drain, CollectionCursor};
use vantage_core::uuid::WorkflowUuid;
use vantage_core::{Client, Error};

/// Build the collection endpoint for a team's workflows.
pub(crate) fn workflows_endpoint(client: &Client, team_slug: Option<&str>) -> Result<String> {
    let team = client.config().team_slug(team_slug)?;
    Ok(format!("v2/teams/{team}/workflows"))
}

/// Build the endpoint for one workflow.
pub(crate) fn workflow_endpoint(
    client: &Client,
    workflow_id: WorkflowUuid,
    team_slug: Option<&str>,
) -> Result<String> {
    let team = client.config().team_slug(team_slug)?;
    Ok(format!("v2/teams/{team}/workflows/{workflow_id}"))
}

/// Fetch a single workflow by id.
///
/// The team is the explicit `team_slug` or the configured default team.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] when no team can be resolved,
/// [`Error::NotFound`] for unknown workflows, or any transport/parse error.
pub async fn get_workflow(
    client: &Client,
    workflow_id: WorkflowUuid,
    team_slug: Option<&str>,
) -> Result<WorkflowModel> {
    let endpoint = workflow_endpoint(client, workflow_id, team_slug)?;
    debug!(%workflow_id, "fetching workflow");

    let raw = client.get(&endpoint).await?;
    serde_json::from_value(raw).map_err(|err| {
        Error::ParseError(format!("Failed to parse workflow `{workflow_id}`: {err}"))
    })
}

/// Fetch every workflow of a team, following pagination to exhaustion.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] when no team can be resolved, or any
/// transport/parse error; a failed page aborts the whole listing.
pub async fn list_workflows(
    client: &Client,
    team_slug: Option<&str>,
) -> Result<Vec<WorkflowModel>> {
    let endpoint = workflows_endpoint(client, team_slug)?;
    let mut cursor: CollectionCursor<WorkflowModel> =
        CollectionCursor::new(client.clone(), endpoint);
    drain(&mut cursor).await
}
