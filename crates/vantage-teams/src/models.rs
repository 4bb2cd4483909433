//! Team data models.

use serde::{Deserialize, Serialize};
use std::fmt;
use vantage_core::query::{lookup_field, Filterable};

/// A team as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Numeric team id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// URL-safe team slug.
    pub slug: String,

    /// Human-readable team name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Filterable for Team {
    fn field(&self, name: &str) -> Option<serde_json::Value> {
        lookup_field(self, name)
    }
}

/// Role of a member within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Full control of the team, including billing.
    Owner,
    /// Manages members, datasets, and workflows.
    Admin,
    /// Regular team member.
    Member,
    /// Can only work annotation stages.
    Annotator,
}

impl MemberRole {
    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Annotator => "annotator",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A team membership as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Membership id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Id of the user holding the membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    /// Member email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Member role.
    pub role: MemberRole,
}

impl Filterable for TeamMember {
    fn field(&self, name: &str) -> Option<serde_json::Value> {
        lookup_field(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn member_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(MemberRole::Owner).unwrap(), json!("owner"));
        assert_eq!(
            serde_json::from_value::<MemberRole>(json!("annotator")).unwrap(),
            MemberRole::Annotator
        );
    }

    #[test]
    fn team_member_filters_on_role_wire_value() {
        let member: TeamMember = serde_json::from_value(json!({
            "id": 1,
            "user_id": 101,
            "email": "annotator@example.com",
            "role": "annotator",
        }))
        .unwrap();

        assert_eq!(member.field("role"), Some(json!("annotator")));
        assert_eq!(member.field("user_id"), Some(json!(101)));
    }

    #[test]
    fn team_parses_minimal_payload() {
        let team: Team = serde_json::from_value(json!({"slug": "ops"})).unwrap();
        assert_eq!(team.slug, "ops");
        assert!(team.id.is_none());
        assert!(team.name.is_none());
    }
}
