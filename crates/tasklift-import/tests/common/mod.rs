//! In-memory source and destination clients for pipeline tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use tasklift_import_types::{
    Comment, DestinationClient, EntityId, ImportError, ImportResult, Project, ProjectSection,
    QuotaCategory, QuotaSnapshot, SourceClient, SourceRecord, Task, TeamId, TeamProject,
};

/// Source platform serving fixed records
///
/// Listing calls named in `fail_listings` (e.g. `list_sections:b2`) raise a
/// platform error.
#[derive(Default)]
pub struct FakeSource {
    pub projects: Vec<SourceRecord>,
    pub sections: HashMap<String, Vec<SourceRecord>>,
    pub tasks: HashMap<String, Vec<SourceRecord>>,
    pub comments: HashMap<String, Vec<SourceRecord>>,
    pub fail_listings: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, id: &str, name: &str, board_kind: &str) -> Self {
        self.projects.push(
            SourceRecord::new()
                .with("id", id)
                .with("name", name)
                .with("board_kind", board_kind)
                .with("state", "active"),
        );
        self
    }

    pub fn section(mut self, project_id: &str, id: &str, title: &str) -> Self {
        self.sections
            .entry(project_id.to_string())
            .or_default()
            .push(SourceRecord::new().with("id", id).with("title", title));
        self
    }

    pub fn task(mut self, project_id: &str, record: SourceRecord) -> Self {
        self.tasks
            .entry(project_id.to_string())
            .or_default()
            .push(record);
        self
    }

    pub fn comment(mut self, task_id: &str, id: &str, body: &str, created_at: &str) -> Self {
        self.comments.entry(task_id.to_string()).or_default().push(
            SourceRecord::new()
                .with("id", id)
                .with("text_body", body)
                .with("created_at", created_at),
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_listing(mut self, call: &str) -> Self {
        self.fail_listings.insert(call.to_string());
        self
    }

    fn record(&self, call: String) -> ImportResult<()> {
        let failed = self.fail_listings.contains(&call);
        self.calls.lock().unwrap().push(call);
        if failed {
            return Err(ImportError::platform("FakeSource", "listing unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl SourceClient for FakeSource {
    fn platform(&self) -> &str {
        "FakeSource"
    }

    async fn list_projects(&self) -> ImportResult<Vec<SourceRecord>> {
        self.record("list_projects".to_string())?;
        Ok(self.projects.clone())
    }

    async fn list_sections(&self, project_external_id: &str) -> ImportResult<Vec<SourceRecord>> {
        self.record(format!("list_sections:{}", project_external_id))?;
        Ok(self
            .sections
            .get(project_external_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_tasks(&self, project_external_id: &str) -> ImportResult<Vec<SourceRecord>> {
        self.record(format!("list_tasks:{}", project_external_id))?;
        Ok(self
            .tasks
            .get(project_external_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_comments(&self, task_external_id: &str) -> ImportResult<Vec<SourceRecord>> {
        self.record(format!("list_comments:{}", task_external_id))?;
        Ok(self
            .comments
            .get(task_external_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Call received by the fake destination
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationCall {
    TeamLimits,
    TeamProjects,
    CurrentMember,
    CreateProject(Project),
    CreateSection(ProjectSection),
    CreateTask(Task),
    CreateComment(Comment),
}

#[derive(Default)]
struct DestinationState {
    calls: Vec<DestinationCall>,
    next_id: usize,
    created: HashSet<EntityId>,
    orphans: Vec<String>,
}

/// Destination platform that assigns sequential ids and records every call
///
/// Names listed in `reject_*` are accepted without returning an entity;
/// names listed in `fail_*` raise a platform error.
pub struct FakeDestination {
    pub quota: QuotaSnapshot,
    pub existing_projects: Vec<TeamProject>,
    pub member: EntityId,
    pub reject_projects: HashSet<String>,
    pub reject_sections: HashSet<String>,
    pub reject_tasks: HashSet<String>,
    pub fail_tasks: HashSet<String>,
    pub fail_comments: HashSet<String>,
    state: Mutex<DestinationState>,
}

impl Default for FakeDestination {
    fn default() -> Self {
        Self {
            quota: QuotaSnapshot::new(),
            existing_projects: Vec::new(),
            member: EntityId::new("member-1"),
            reject_projects: HashSet::new(),
            reject_sections: HashSet::new(),
            reject_tasks: HashSet::new(),
            fail_tasks: HashSet::new(),
            fail_comments: HashSet::new(),
            state: Mutex::new(DestinationState::default()),
        }
    }
}

impl FakeDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cap(mut self, category: QuotaCategory, cap: i64) -> Self {
        self.quota = self.quota.with_cap(category, cap);
        self
    }

    pub fn with_existing(mut self, is_open: bool, ended_at: Option<i64>) -> Self {
        let id = EntityId::new(format!("existing-{}", self.existing_projects.len()));
        self.existing_projects.push(TeamProject {
            id,
            is_open,
            ended_at,
        });
        self
    }

    pub fn calls(&self) -> Vec<DestinationCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Entities whose parent had not been created when they were submitted
    pub fn orphans(&self) -> Vec<String> {
        self.state.lock().unwrap().orphans.clone()
    }

    pub fn created_projects(&self) -> Vec<Project> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DestinationCall::CreateProject(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn created_sections(&self) -> Vec<ProjectSection> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DestinationCall::CreateSection(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn created_tasks(&self) -> Vec<Task> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DestinationCall::CreateTask(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn created_comments(&self) -> Vec<Comment> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DestinationCall::CreateComment(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Record a create call and hand out an id unless the entity is rejected
    fn create(
        &self,
        call: DestinationCall,
        prefix: &str,
        parent: Option<&EntityId>,
        rejected: bool,
    ) -> Option<EntityId> {
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = parent {
            if !state.created.contains(parent) {
                state.orphans.push(format!("{:?}", call));
            }
        }
        state.calls.push(call);
        if rejected {
            return None;
        }
        state.next_id += 1;
        let id = EntityId::new(format!("{}-{}", prefix, state.next_id));
        state.created.insert(id.clone());
        Some(id)
    }
}

#[async_trait]
impl DestinationClient for FakeDestination {
    fn platform(&self) -> &str {
        "FakeDestination"
    }

    async fn team_limits(&self, _team_id: &TeamId) -> ImportResult<QuotaSnapshot> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(DestinationCall::TeamLimits);
        Ok(self.quota.clone())
    }

    async fn team_projects(&self, _team_id: &TeamId) -> ImportResult<Vec<TeamProject>> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(DestinationCall::TeamProjects);
        Ok(self.existing_projects.clone())
    }

    async fn current_member(&self, _team_id: &TeamId) -> ImportResult<EntityId> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(DestinationCall::CurrentMember);
        Ok(self.member.clone())
    }

    async fn create_project(&self, project: &Project) -> ImportResult<Option<Project>> {
        let rejected = self.reject_projects.contains(&project.name);
        let id = self.create(
            DestinationCall::CreateProject(project.clone()),
            "proj",
            None,
            rejected,
        );
        Ok(id.map(|id| Project {
            id,
            ..project.clone()
        }))
    }

    async fn create_section(
        &self,
        section: &ProjectSection,
    ) -> ImportResult<Option<ProjectSection>> {
        let rejected = self.reject_sections.contains(&section.name);
        let id = self.create(
            DestinationCall::CreateSection(section.clone()),
            "sec",
            Some(&section.project_id),
            rejected,
        );
        Ok(id.map(|id| ProjectSection {
            id,
            ..section.clone()
        }))
    }

    async fn create_task(&self, task: &Task) -> ImportResult<Option<Task>> {
        if self.fail_tasks.contains(&task.name) {
            self.state
                .lock()
                .unwrap()
                .calls
                .push(DestinationCall::CreateTask(task.clone()));
            return Err(ImportError::platform("FakeDestination", "rate limited"));
        }
        let rejected = self.reject_tasks.contains(&task.name);
        let id = self.create(
            DestinationCall::CreateTask(task.clone()),
            "task",
            Some(&task.project_id),
            rejected,
        );
        Ok(id.map(|id| Task {
            id,
            ..task.clone()
        }))
    }

    async fn create_comment(&self, comment: &Comment) -> ImportResult<Option<Comment>> {
        if self.fail_comments.contains(&comment.body) {
            self.state
                .lock()
                .unwrap()
                .calls
                .push(DestinationCall::CreateComment(comment.clone()));
            return Err(ImportError::platform("FakeDestination", "comment rejected"));
        }
        let id = self.create(
            DestinationCall::CreateComment(comment.clone()),
            "com",
            Some(&comment.task_id),
            false,
        );
        Ok(id.map(|id| Comment {
            id,
            ..comment.clone()
        }))
    }
}
