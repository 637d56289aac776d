//! Nozbe REST client
//!
//! Reads team limits, team projects and the acting member, and creates
//! projects, sections, tasks and comments. Authenticates with the user's
//! access token sent verbatim in the `Authorization` header.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tasklift_import_types::{
    Comment, DestinationClient, EntityId, ImportError, ImportResult, Project, ProjectSection,
    QuotaSnapshot, Task, TeamId, TeamProject,
};
use tracing::debug;

pub const DEFAULT_NOZBE_API_URL: &str = "https://api4.nozbe.com/v1/api";

const PLATFORM: &str = "Nozbe";

/// Nozbe API client
pub struct NozbeClient {
    client: Client,
    token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NozbeTeam {
    #[serde(default)]
    limits: Value,
}

#[derive(Debug, Deserialize)]
struct NozbeUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct NozbeTeamMember {
    id: String,
    user_id: Option<String>,
}

impl NozbeClient {
    /// Create a client for the API at `base_url`
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> ImportResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ImportError::platform(PLATFORM, format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw body of a successful response
    async fn send(&self, request: RequestBuilder, what: &str) -> ImportResult<String> {
        let response = request
            .header("Authorization", &self.token)
            .send()
            .await
            .map_err(|e| ImportError::platform(PLATFORM, format!("{} failed: {}", what, e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ImportError::platform(PLATFORM, format!("Failed to read {} response: {}", what, e))
        })?;

        if !status.is_success() {
            return Err(ImportError::platform(
                PLATFORM,
                format!("{} returned status {}: {}", what, status, body),
            ));
        }

        Ok(body)
    }

    fn decode<T: DeserializeOwned>(body: &str, what: &str) -> ImportResult<T> {
        serde_json::from_str(body).map_err(|e| {
            debug!("Failed to parse {} response: {}", what, body);
            ImportError::from(e)
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> ImportResult<T> {
        let body = self.send(request, what).await?;
        Self::decode(&body, what)
    }

    /// POST an entity and return the id the destination assigned
    ///
    /// Only the id is read from the response. An empty body, `null`, any
    /// non-object, or an object without a non-empty id means nothing was
    /// created.
    async fn create<T: Serialize>(
        &self,
        path: &str,
        entity: &T,
        what: &str,
    ) -> ImportResult<Option<EntityId>> {
        let body = self
            .send(self.client.post(self.url(path)).json(entity), what)
            .await?;

        let trimmed = body.trim();
        if trimmed.is_empty() {
            debug!("{} returned no entity", what);
            return Ok(None);
        }

        let value: Value = Self::decode(trimmed, what)?;
        let id = match value.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };
        let id = id.map(EntityId::new).and_then(EntityId::non_empty);
        if id.is_none() {
            debug!("{} returned no entity id", what);
        }
        Ok(id)
    }
}

#[async_trait]
impl DestinationClient for NozbeClient {
    fn platform(&self) -> &str {
        PLATFORM
    }

    async fn team_limits(&self, team_id: &TeamId) -> ImportResult<QuotaSnapshot> {
        let path = format!("/teams/{}", urlencoding::encode(team_id.as_str()));
        let team: NozbeTeam = self
            .get(self.client.get(self.url(&path)), "Team lookup")
            .await?;
        Ok(QuotaSnapshot::from_limits(&team.limits))
    }

    async fn team_projects(&self, team_id: &TeamId) -> ImportResult<Vec<TeamProject>> {
        let request = self
            .client
            .get(self.url("/projects"))
            .query(&[("team_id", team_id.as_str())]);
        self.get(request, "Team projects listing").await
    }

    async fn current_member(&self, team_id: &TeamId) -> ImportResult<EntityId> {
        let user: NozbeUser = self
            .get(self.client.get(self.url("/me")), "User lookup")
            .await?;
        let request = self
            .client
            .get(self.url("/team_members"))
            .query(&[("team_id", team_id.as_str())]);
        let members: Vec<NozbeTeamMember> = self.get(request, "Team members listing").await?;

        members
            .into_iter()
            .find(|m| m.user_id.as_deref() == Some(user.id.as_str()))
            .map(|m| EntityId::new(m.id))
            .ok_or_else(|| {
                ImportError::platform(
                    PLATFORM,
                    format!("User {} is not a member of team {}", user.id, team_id),
                )
            })
    }

    async fn create_project(&self, project: &Project) -> ImportResult<Option<Project>> {
        let id = self
            .create("/projects", project, "Project creation")
            .await?;
        Ok(id.map(|id| Project {
            id,
            ..project.clone()
        }))
    }

    async fn create_section(
        &self,
        section: &ProjectSection,
    ) -> ImportResult<Option<ProjectSection>> {
        let id = self
            .create("/project_sections", section, "Section creation")
            .await?;
        Ok(id.map(|id| ProjectSection {
            id,
            ..section.clone()
        }))
    }

    async fn create_task(&self, task: &Task) -> ImportResult<Option<Task>> {
        let id = self.create("/tasks", task, "Task creation").await?;
        Ok(id.map(|id| Task {
            id,
            ..task.clone()
        }))
    }

    async fn create_comment(&self, comment: &Comment) -> ImportResult<Option<Comment>> {
        let id = self
            .create("/comments", comment, "Comment creation")
            .await?;
        Ok(id.map(|id| Comment {
            id,
            ..comment.clone()
        }))
    }
}
