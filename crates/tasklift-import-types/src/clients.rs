//! Collaborator traits
//!
//! Defines the interfaces the import pipeline needs from the source and
//! destination platforms. Implementations live in their own crates
//! (`tasklift-import-monday`, `tasklift-nozbe`) and in test fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::ImportResult,
    ids::{EntityId, TeamId},
    models::{Comment, Project, ProjectSection, Task},
    quota::QuotaSnapshot,
    records::SourceRecord,
};

/// Source platform client
///
/// Every listing returns records in the platform's own order.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Human-readable platform name used in logs and errors
    fn platform(&self) -> &str;

    async fn list_projects(&self) -> ImportResult<Vec<SourceRecord>>;

    async fn list_sections(&self, project_external_id: &str) -> ImportResult<Vec<SourceRecord>>;

    async fn list_tasks(&self, project_external_id: &str) -> ImportResult<Vec<SourceRecord>>;

    async fn list_comments(&self, task_external_id: &str) -> ImportResult<Vec<SourceRecord>>;
}

/// Project already present in the destination team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamProject {
    pub id: EntityId,
    pub is_open: bool,
    pub ended_at: Option<i64>,
}

impl TeamProject {
    /// Counts against the open-project limit
    pub fn is_active(&self) -> bool {
        self.is_open && self.ended_at.map_or(true, |ended| ended == 0)
    }
}

/// Destination platform client
///
/// Create operations return `Ok(None)` when the destination accepts the
/// request but hands back no entity; that prunes only the record's subtree.
/// `Err` is reserved for failures that abort the whole run.
#[async_trait]
pub trait DestinationClient: Send + Sync {
    /// Human-readable platform name used in logs and errors
    fn platform(&self) -> &str;

    async fn team_limits(&self, team_id: &TeamId) -> ImportResult<QuotaSnapshot>;

    async fn team_projects(&self, team_id: &TeamId) -> ImportResult<Vec<TeamProject>>;

    /// Team member id of the authenticated user
    async fn current_member(&self, team_id: &TeamId) -> ImportResult<EntityId>;

    async fn create_project(&self, project: &Project) -> ImportResult<Option<Project>>;

    async fn create_section(&self, section: &ProjectSection)
        -> ImportResult<Option<ProjectSection>>;

    async fn create_task(&self, task: &Task) -> ImportResult<Option<Task>>;

    async fn create_comment(&self, comment: &Comment) -> ImportResult<Option<Comment>>;
}
