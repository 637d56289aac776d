//! Source record to destination payload mapping
//!
//! Mapping never fails: a missing or malformed optional field becomes `None`.
//! Read-only fields get placeholders (a fresh id, `PLACEHOLDER_TIMESTAMP`);
//! the destination assigns the real values and the fields are dropped on
//! serialization.

use tasklift_import_types::{
    new_id, parse_timestamp, Comment, EntityId, Project, ProjectSection, SourceComment,
    SourceProject, SourceSection, SourceTask, Task, TeamId, PLACEHOLDER_TIMESTAMP,
};

use crate::identifier_map::IdentifierMap;

/// Position used when the source section has none
pub const DEFAULT_SECTION_POSITION: f64 = 1.0;

/// Position given to every imported task within its project
pub const DEFAULT_TASK_POSITION: f64 = 1.0;

pub fn map_project(project: &SourceProject, team_id: &TeamId) -> Project {
    Project {
        id: new_id(),
        author_id: new_id(),
        created_at: PLACEHOLDER_TIMESTAMP,
        last_event_at: PLACEHOLDER_TIMESTAMP,
        name: project.name.clone(),
        team_id: Some(team_id.clone()),
        description: project.description.clone(),
        is_open: project.kind.is_public(),
        ended_at: project.state.is_ended().then_some(PLACEHOLDER_TIMESTAMP),
        extra: String::new(),
    }
}

pub fn map_section(section: &SourceSection, project_id: &EntityId) -> ProjectSection {
    ProjectSection {
        id: new_id(),
        created_at: PLACEHOLDER_TIMESTAMP,
        project_id: project_id.clone(),
        name: section.title.clone(),
        archived_at: section.archived.then_some(PLACEHOLDER_TIMESTAMP),
        position: section.position.unwrap_or(DEFAULT_SECTION_POSITION),
    }
}

/// Map a task; the acting member becomes responsible only when a due date exists
pub fn map_task(
    task: &SourceTask,
    project_id: &EntityId,
    sections: &IdentifierMap,
    acting_member: &EntityId,
) -> Task {
    let due_at = task.due_at.as_deref().and_then(parse_timestamp);
    let responsible_id = due_at.map(|_| acting_member.clone());

    Task {
        id: new_id(),
        author_id: new_id(),
        created_at: PLACEHOLDER_TIMESTAMP,
        last_activity_at: PLACEHOLDER_TIMESTAMP,
        name: task.name.clone(),
        project_id: project_id.clone(),
        project_section_id: sections.resolve(task.group.as_deref()),
        project_position: DEFAULT_TASK_POSITION,
        due_at,
        responsible_id,
    }
}

pub fn map_comment(comment: &SourceComment, task_id: &EntityId) -> Comment {
    Comment {
        id: new_id(),
        author_id: new_id(),
        created_at: PLACEHOLDER_TIMESTAMP,
        body: comment.body.clone(),
        task_id: task_id.clone(),
        extra: String::new(),
    }
}

/// Stable sort by parsed creation time; unparseable times sort first
pub fn sort_comments(mut comments: Vec<SourceComment>) -> Vec<SourceComment> {
    comments.sort_by_cached_key(|c| c.created_at.as_deref().and_then(parse_timestamp));
    comments
}
