//! Team endpoint operations.

use crate::models::Team;
use crate::Result;
use tracing::debug;
use vantage_core::{Client, Error};

/// Fetch a team by slug; `None` resolves the configured default team.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] when no team can be resolved,
/// [`Error::NotFound`] for unknown teams, or any transport/parse error.
pub async fn get_team(client: &Client, team_slug: Option<&str>) -> Result<Team> {
    let team = client.config().team_slug(team_slug)?;
    let endpoint = format!("v2/teams/{team}");
    debug!(team, "fetching team");

    let raw = client.get(&endpoint).await?;
    serde_json::from_value(raw)
        .map_err(|err| Error::ParseError(format!("Failed to parse team `{team}`: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vantage_core::Config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn get_team_by_explicit_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams/ops"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "slug": "ops",
                "name": "Operations",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(Config::new(server.uri()).unwrap()).unwrap();
        let team = get_team(&client, Some("ops")).await.unwrap();
        assert_eq!(team.slug, "ops");
        assert_eq!(team.name.as_deref(), Some("Operations"));
    }

    #[tokio::test]
    async fn get_team_falls_back_to_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/teams/default-team"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"slug": "default-team"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new(server.uri())
            .unwrap()
            .with_default_team("default-team");
        let client = Client::new(config).unwrap();
        get_team(&client, None).await.unwrap();
    }

    #[tokio::test]
    async fn get_team_without_any_slug_is_a_config_error() {
        let server = MockServer::start().await;
        let client = Client::new(Config::new(server.uri()).unwrap()).unwrap();

        let err = get_team(&client, None).await.unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
