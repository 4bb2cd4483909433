//! Typed wrapper pairing a team with the client that fetched it.

use crate::models::Team;
use crate::query::MemberQuery;
use vantage_core::Client;

/// A team together with the client it was fetched through.
#[derive(Debug, Clone)]
pub struct TeamMeta {
    client: Client,
    item: Team,
}

impl TeamMeta {
    /// Wrap a parsed team.
    #[must_use]
    pub fn new(client: Client, item: Team) -> Self {
        Self { client, item }
    }

    /// Team slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.item.slug
    }

    /// The underlying parsed model.
    #[must_use]
    pub fn model(&self) -> &Team {
        &self.item
    }

    /// Query over this team's members.
    #[must_use]
    pub fn members(&self) -> MemberQuery {
        MemberQuery::new(self.client.clone()).with_team(self.item.slug.clone())
    }
}
