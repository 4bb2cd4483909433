//! Lazily-evaluated query over a team's members.

use crate::models::TeamMember;
use crate::Result;
use vantage_core::pagination::{drain, CollectionCursor};
use vantage_core::query::{apply_predicates, Predicate};
use vantage_core::Client;

/// Query over the members of one team.
///
/// The team slug is a route parameter; predicates narrow the fetched
/// memberships locally.
#[derive(Debug, Clone)]
pub struct MemberQuery {
    client: Client,
    team_slug: Option<String>,
    predicates: Vec<Predicate>,
}

impl MemberQuery {
    /// Create a query over the default team's members.
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

    /// Return a new query with the predicate appended, leaving the receiver
    /// untouched.
    #[must_use]
    pub fn filter(&self, predicate: Predicate) -> Self {
        let mut next = self.clone();
        next.predicates.push(predicate);
        next
    }

    /// Fetch every page of memberships, apply all predicates, and return
    /// the matches in fetch order.
    ///
    /// # Errors
    ///
    /// A failed page fetch aborts the whole collection.
    pub async fn collect(&self) -> Result<Vec<TeamMember>> {
        let team = self
            .client
            .config()
            .team_slug(self.team_slug.as_deref())?
            .to_string();

        let mut cursor: CollectionCursor<TeamMember> = CollectionCursor::new(
            self.client.clone(),
            format!("v2/teams/{team}/members"),
        );

        let members = drain(&mut cursor).await?;
        Ok(apply_predicates(members, &self.predicates))
    }
}
