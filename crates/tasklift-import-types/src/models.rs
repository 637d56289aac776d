//! Destination entity models
//!
//! Each model carries the destination's read-only fields (`id`, `author_id`,
//! `created_at`, ...) so a created entity can be decoded from the API response.
//! Those fields are skipped when the model is serialized, which keeps them out
//! of every creation request.

use serde::{Deserialize, Serialize};

use crate::ids::{EntityId, TeamId};

/// Placeholder written into server-managed timestamp fields before submission
pub const PLACEHOLDER_TIMESTAMP: i64 = 1;

/// Destination project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing)]
    pub id: EntityId,
    #[serde(skip_serializing)]
    pub author_id: EntityId,
    #[serde(skip_serializing)]
    pub created_at: i64,
    #[serde(skip_serializing)]
    pub last_event_at: i64,
    pub name: String,
    pub team_id: Option<TeamId>,
    pub description: Option<String>,
    pub is_open: bool,
    pub ended_at: Option<i64>,
    pub extra: String,
}

/// Destination project section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    #[serde(skip_serializing)]
    pub id: EntityId,
    #[serde(skip_serializing)]
    pub created_at: i64,
    pub project_id: EntityId,
    pub name: String,
    pub archived_at: Option<i64>,
    pub position: f64,
}

/// Destination task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(skip_serializing)]
    pub id: EntityId,
    #[serde(skip_serializing)]
    pub author_id: EntityId,
    #[serde(skip_serializing)]
    pub created_at: i64,
    #[serde(skip_serializing)]
    pub last_activity_at: i64,
    pub name: String,
    pub project_id: EntityId,
    pub project_section_id: Option<EntityId>,
    pub project_position: f64,
    pub due_at: Option<i64>,
    pub responsible_id: Option<EntityId>,
}

/// Destination comment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(skip_serializing)]
    pub id: EntityId,
    #[serde(skip_serializing)]
    pub author_id: EntityId,
    #[serde(skip_serializing)]
    pub created_at: i64,
    pub body: String,
    pub task_id: EntityId,
    pub extra: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_only_fields_are_stripped() {
        let task = Task {
            id: EntityId::new("placeholder00001"),
            author_id: EntityId::new("placeholder00002"),
            created_at: PLACEHOLDER_TIMESTAMP,
            last_activity_at: PLACEHOLDER_TIMESTAMP,
            name: "Write docs".to_string(),
            project_id: EntityId::new("p1"),
            project_section_id: None,
            project_position: 1.0,
            due_at: None,
            responsible_id: None,
        };

        let payload = serde_json::to_value(&task).unwrap();

        assert_eq!(
            payload,
            json!({
                "name": "Write docs",
                "project_id": "p1",
                "project_section_id": null,
                "project_position": 1.0,
                "due_at": null,
                "responsible_id": null,
            })
        );
    }

    #[test]
    fn test_created_entity_decodes_server_fields() {
        let section: ProjectSection = serde_json::from_value(json!({
            "id": "s-created",
            "project_id": "p1",
            "name": "Backlog",
            "created_at": 1700000000000i64,
        }))
        .unwrap();

        assert_eq!(section.id.as_str(), "s-created");
        assert_eq!(section.created_at, 1_700_000_000_000);
        assert_eq!(section.archived_at, None);
    }
}
