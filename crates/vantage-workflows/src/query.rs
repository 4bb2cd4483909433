//! Lazily-evaluated queries over workflows and their stages.

use crate::meta::{Stage, Workflow};
use crate::models::{StageModel, WorkflowModel};
use crate::ops::{workflow_endpoint, workflows_endpoint};
use crate::Result;
use async_trait::async_trait;
use vantage_core::pagination::{drain, CollectionCursor, Cursor, Page, PageDetail};
use vantage_core::query::{apply_predicates, Predicate};
use vantage_core::uuid::WorkflowUuid;
use vantage_core::{Client, Error};

/// Query over the workflows of one team.
///
/// Building and chaining the query performs no I/O; every [`collect`]
/// drives a fresh cursor over the collection and filters locally.
///
/// [`collect`]: WorkflowQuery::collect
#[derive(Debug, Clone)]
pub struct WorkflowQuery {
    client: Client,
    team_slug: Option<String>,
    predicates: Vec<Predicate>,
}

impl WorkflowQuery {
    /// Create a query over the default team's workflows.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_predicates(client, Vec::new())
    }

    /// Create a query seeded with initial predicates.
    #[must_use]
    pub fn with_predicates(client: Client, predicates: Vec<Predicate>) -> Self {
        Self {
            client,
            team_slug: None,
            predicates,
        }
    }

    /// Target an explicit team instead of the configured default.
    #[must_use]
    pub fn with_team(mut self, slug: impl Into<String>) -> Self {
        self.team_slug = Some(slug.into());
        self
    }

    /// Return a new query with the predicate appended.
    ///
    /// The receiver is left untouched, so previously obtained handles to the
    /// same query keep their filter set.
    #[must_use]
    pub fn filter(&self, predicate: Predicate) -> Self {
        let mut next = self.clone();
        next.predicates.push(predicate);
        next
    }

    /// Fetch every page of the collection, apply all predicates, and wrap
    /// the matches.
    ///
    /// Repeated calls re-fetch; nothing is cached between them.
    ///
    /// # Errors
    ///
    /// A failed page fetch aborts the whole collection; no partial results
    /// are returned.
    pub async fn collect(&self) -> Result<Vec<Workflow>> {
        let endpoint = workflows_endpoint(&self.client, self.team_slug.as_deref())?;
        let mut cursor: CollectionCursor<WorkflowModel> =
            CollectionCursor::new(self.client.clone(), endpoint);

        let models = drain(&mut cursor).await?;
        let matched = apply_predicates(models, &self.predicates);

        Ok(matched
            .into_iter()
            .map(|item| Workflow::new(self.client.clone(), item))
            .collect())
    }
}

/// Query over the stages of one workflow.
///
/// The workflow id is a route parameter: it decides which workflow is
/// fetched, while predicates narrow the stages after the fetch.
#[derive(Debug, Clone)]
pub struct StageQuery {
    client: Client,
    workflow_id: WorkflowUuid,
    team_slug: Option<String>,
    predicates: Vec<Predicate>,
}

impl StageQuery {
    /// Create a query over the given workflow's stages.
    #[must_use]
    pub fn new(client: Client, workflow_id: WorkflowUuid) -> Self {
        Self::with_predicates(client, workflow_id, Vec::new())
    }

    /// Create a query seeded with initial predicates.
    #[must_use]
    pub fn with_predicates(
        client: Client,
        workflow_id: WorkflowUuid,
        predicates: Vec<Predicate>,
    ) -> Self {
        Self {
            client,
            workflow_id,
            team_slug: None,
            predicates,
        }
    }

    /// Target an explicit team instead of the configured default.
    #[must_use]
    pub fn with_team(mut self, slug: impl Into<String>) -> Self {
        self.team_slug = Some(slug.into());
        self
    }

    /// Return a new query with the predicate appended.
    #[must_use]
    pub fn filter(&self, predicate: Predicate) -> Self {
        let mut next = self.clone();
        next.predicates.push(predicate);
        next
    }

    /// Fetch the owning workflow, apply all predicates to its stages, and
    /// wrap the matches.
    ///
    /// # Errors
    ///
    /// Propagates team resolution and transport/parse errors.
    pub async fn collect(&self) -> Result<Vec<Stage>> {
        let mut cursor = StageCursor::new(
            self.client.clone(),
            self.workflow_id,
            self.team_slug.as_deref(),
        )?;

        let models = drain(&mut cursor).await?;
        let matched = apply_predicates(models, &self.predicates);

        Ok(matched
            .into_iter()
            .map(|item| Stage::new(self.client.clone(), self.workflow_id, item))
            .collect())
    }
}

/// Cursor yielding the stages of one workflow.
///
/// Stages are not served as a paged collection; the cursor fetches the
/// owning workflow once and synthesizes a single terminal page from its
/// embedded stages.
#[derive(Debug)]
pub struct StageCursor {
    client: Client,
    endpoint: String,
    done: bool,
}

impl StageCursor {
    /// Create a cursor positioned at the workflow's endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when no team can be resolved.
    pub fn new(
        client: Client,
        workflow_id: WorkflowUuid,
        team_slug: Option<&str>,
    ) -> Result<Self> {
        let endpoint = workflow_endpoint(&client, workflow_id, team_slug)?;
        Ok(Self {
            client,
            endpoint,
            done: false,
        })
    }
}

#[async_trait]
impl Cursor for StageCursor {
    type Item = StageModel;

    async fn execute(&self) -> Result<Page<StageModel>> {
        if self.done {
            return Err(Error::InvalidEndpoint("cursor is exhausted".to_string()));
        }

        let raw = self.client.get(&self.endpoint).await?;
        let workflow: WorkflowModel = serde_json::from_value(raw).map_err(|err| {
            Error::ParseError(format!(
                "Failed to parse workflow from `{}`: {err}",
                self.endpoint
            ))
        })?;

        let count = u32::try_from(workflow.stages.len()).unwrap_or(u32::MAX);
        Ok(Page {
            results: workflow.stages,
            detail: PageDetail {
                count,
                next: None,
                previous: None,
            },
        })
    }

    async fn next_page(&mut self) -> Result<Option<Page<StageModel>>> {
        if self.done {
            return Ok(None);
        }

        let page = self.execute().await?;
        self.done = true;
        Ok(Some(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageType;
    use serde_json::{json, Value};
    use vantage_core::uuid::StageUuid;
    use vantage_core::Config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_client(server: &MockServer) -> Client {
        let config = Config::new(server.uri())
            .unwrap()
            .with_default_team("default-team");
        Client::new(config).unwrap()
    }

    fn stage_json(name: &str, stage_type: StageType) -> Value {
        json!({
            "id": StageUuid::new_v4().to_string(),
            "name": name,
            "type": stage_type.as_str(),
        })
    }

    /// A workflow with three stages of each type, nine in total.
    fn multi_stage_workflow(id: WorkflowUuid) -> Value {
        let mut stages = Vec::new();
        for round in 0..3 {
            for stage_type in StageType::ALL {
                stages.push(stage_json(
                    &format!("stage{}-{stage_type}", round * 3),
                    stage_type,
                ));
            }
        }
        json!({
            "id": id.to_string(),
            "name": "pipeline",
            "stages": stages,
        })
    }

    async fn mount_workflow(server: &MockServer, id: WorkflowUuid, body: Value, calls: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/v2/teams/default-team/workflows/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn stage_query_collects_all_stages() {
        let server = MockServer::start().await;
        let id = WorkflowUuid::new_v4();
        mount_workflow(&server, id, multi_stage_workflow(id), 1).await;

        let client = test_client(&server).await;
        let stages = StageQuery::new(client, id).collect().await.unwrap();
        assert_eq!(stages.len(), 9);
    }

    #[tokio::test]
    async fn stage_query_filters_by_name() {
        let server = MockServer::start().await;
        let id = WorkflowUuid::new_v4();
        mount_workflow(&server, id, multi_stage_workflow(id), 1).await;

        let client = test_client(&server).await;
        let stages = StageQuery::new(client, id)
            .filter(Predicate::new("name", "stage0-annotate"))
            .collect()
            .await
            .unwrap();

        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].model().name, "stage0-annotate");
    }

    #[tokio::test]
    async fn stage_query_filters_by_type() {
        for stage_type in StageType::ALL {
            let server = MockServer::start().await;
            let id = WorkflowUuid::new_v4();
            mount_workflow(&server, id, multi_stage_workflow(id), 1).await;

            let client = test_client(&server).await;
            let stages = StageQuery::new(client, id)
                .filter(Predicate::new("type", stage_type.as_str()))
                .collect()
                .await
                .unwrap();

            assert_eq!(stages.len(), 3);
            for stage in &stages {
                assert_eq!(stage.model().stage_type, stage_type);
            }
        }
    }

    #[tokio::test]
    async fn stage_query_chaining_leaves_original_untouched() {
        let server = MockServer::start().await;
        let id = WorkflowUuid::new_v4();
        mount_workflow(&server, id, multi_stage_workflow(id), 2).await;

        let client = test_client(&server).await;
        let unfiltered = StageQuery::new(client, id);
        let filtered = unfiltered.filter(Predicate::new("type", "annotate"));

        assert_eq!(unfiltered.collect().await.unwrap().len(), 9);
        assert_eq!(filtered.collect().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn stage_query_collect_is_idempotent_but_refetches() {
        let server = MockServer::start().await;
        let id = WorkflowUuid::new_v4();
        mount_workflow(&server, id, multi_stage_workflow(id), 2).await;

        let client = test_client(&server).await;
        let query = StageQuery::new(client, id).filter(Predicate::new("type", "review"));

        let first: Vec<_> = query
            .collect()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.model().clone())
            .collect();
        let second: Vec<_> = query
            .collect()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.model().clone())
            .collect();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn stage_query_propagates_fetch_failure() {
        let server = MockServer::start().await;
        let id = WorkflowUuid::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/v2/teams/default-team/workflows/{id}")))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let err = StageQuery::new(client, id).collect().await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn stage_cursor_yields_one_terminal_page() {
        let server = MockServer::start().await;
        let id = WorkflowUuid::new_v4();
        mount_workflow(&server, id, multi_stage_workflow(id), 1).await;

        let client = test_client(&server).await;
        let mut cursor = StageCursor::new(client, id, None).unwrap();

        let page = cursor.next_page().await.unwrap().unwrap();
        assert_eq!(page.results.len(), 9);
        assert_eq!(page.detail.count, 9);
        assert!(page.detail.is_terminal());
        assert!(cursor.next_page().await.unwrap().is_none());
    }

    fn workflow_json(id: WorkflowUuid, name: &str) -> Value {
        json!({"id": id.to_string(), "name": name, "stages": []})
    }

    #[tokio::test]
    async fn workflow_query_single_page_preserves_order() {
        let server = MockServer::start().await;
        let ids: Vec<_> = (0..3).map(|_| WorkflowUuid::new_v4()).collect();
        let results: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| workflow_json(*id, &format!("wf-{i}")))
            .collect();

        Mock::given(method("GET"))
            .and(path("/v2/teams/default-team/workflows"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": results,
                "count": 3,
                "next": null,
                "previous": null,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let workflows = WorkflowQuery::new(client).collect().await.unwrap();
        assert_eq!(workflows.len(), 3);
        for (workflow, id) in workflows.iter().zip(&ids) {
            assert_eq!(workflow.id(), *id);
        }
    }

    #[tokio::test]
    async fn workflow_query_concatenates_two_pages() {
        let server = MockServer::start().await;
        let first = WorkflowUuid::new_v4();
        let second = WorkflowUuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/v2/teams/default-team/workflows"))
            .and(wiremock::matchers::query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [workflow_json(second, "wf-b")],
                "count": 2,
                "next": null,
                "previous": null,
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/teams/default-team/workflows"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [workflow_json(first, "wf-a")],
                "count": 1,
                "next": "v2/teams/default-team/workflows?page=2",
                "previous": null,
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let workflows = WorkflowQuery::new(client).collect().await.unwrap();
        let ids: Vec<_> = workflows.iter().map(Workflow::id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn workflow_query_filters_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams/default-team/workflows"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    workflow_json(WorkflowUuid::new_v4(), "alpha"),
                    workflow_json(WorkflowUuid::new_v4(), "beta"),
                    workflow_json(WorkflowUuid::new_v4(), "alpha"),
                ],
                "count": 3,
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let workflows = WorkflowQuery::new(client)
            .filter(Predicate::new("name", "alpha"))
            .collect()
            .await
            .unwrap();
        assert_eq!(workflows.len(), 2);
    }
}
