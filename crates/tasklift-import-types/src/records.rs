//! Source platform records
//!
//! Source APIs hand back loosely-typed objects whose keys may be missing or
//! null. `SourceRecord` keeps the raw object and exposes explicit optional
//! accessors; the typed views (`SourceProject`, `SourceSection`, ...) decide a
//! default for every field so mapping never depends on a key being present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Loosely-typed record returned by a source platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRecord(pub Map<String, Value>);

impl SourceRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert or replace a field, returning the record for chaining
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// String field; numbers and booleans are rendered as text
    pub fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// String field, `None` when missing or empty
    pub fn non_empty_string(&self, key: &str) -> Option<String> {
        self.string(key).filter(|s| !s.is_empty())
    }

    /// Truthiness of a field: missing, null, false, 0, "" and empty
    /// collections are false
    pub fn truthy(&self, key: &str) -> bool {
        match self.get(key) {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Null) => false,
        }
    }

    /// Numeric field; numeric strings are parsed
    pub fn float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for SourceRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Archival state of a source project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectState {
    Active,
    Archived,
    Deleted,
    Other(String),
}

impl ProjectState {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "active" => ProjectState::Active,
            "archived" => ProjectState::Archived,
            "deleted" => ProjectState::Deleted,
            other => ProjectState::Other(other.to_string()),
        }
    }

    /// Archived and deleted projects are imported as ended
    pub fn is_ended(&self) -> bool {
        matches!(self, ProjectState::Archived | ProjectState::Deleted)
    }
}

/// Visibility kind of a source project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardKind {
    Public,
    Private,
    Share,
    Other(String),
}

impl BoardKind {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "public" => BoardKind::Public,
            "private" => BoardKind::Private,
            "share" => BoardKind::Share,
            other => BoardKind::Other(other.to_string()),
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, BoardKind::Public)
    }
}

/// Project as listed by the source platform
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProject {
    pub external_id: String,
    pub name: String,
    pub description: Option<String>,
    pub state: ProjectState,
    pub kind: BoardKind,
}

impl From<&SourceRecord> for SourceProject {
    fn from(record: &SourceRecord) -> Self {
        Self {
            external_id: record.string("id").unwrap_or_default(),
            name: record.string("name").unwrap_or_default(),
            description: record.non_empty_string("description"),
            state: ProjectState::from_str(&record.string("state").unwrap_or_default()),
            kind: BoardKind::from_str(&record.string("board_kind").unwrap_or_default()),
        }
    }
}

/// Section (list/group) of a source project
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSection {
    pub external_id: String,
    pub title: String,
    /// Raw position; `None` when missing, unparseable or zero
    pub position: Option<f64>,
    pub archived: bool,
}

impl From<&SourceRecord> for SourceSection {
    fn from(record: &SourceRecord) -> Self {
        Self {
            external_id: record.string("id").unwrap_or_default(),
            title: record.string("title").unwrap_or_default(),
            position: record
                .float("position")
                .filter(|p| p.is_finite() && *p != 0.0),
            archived: record.truthy("archived"),
        }
    }
}

/// Task of a source project
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTask {
    pub external_id: String,
    pub name: String,
    /// Source section the task belongs to
    pub group: Option<String>,
    /// ISO-8601 due timestamp
    pub due_at: Option<String>,
}

impl From<&SourceRecord> for SourceTask {
    fn from(record: &SourceRecord) -> Self {
        Self {
            external_id: record.string("id").unwrap_or_default(),
            name: record.string("name").unwrap_or_default(),
            group: record.non_empty_string("group"),
            due_at: record.non_empty_string("due_at"),
        }
    }
}

/// Comment attached to a source task
#[derive(Debug, Clone, PartialEq)]
pub struct SourceComment {
    pub external_id: String,
    pub body: String,
    /// ISO-8601 creation timestamp
    pub created_at: Option<String>,
}

impl From<&SourceRecord> for SourceComment {
    fn from(record: &SourceRecord) -> Self {
        Self {
            external_id: record.string("id").unwrap_or_default(),
            body: record.string("text_body").unwrap_or_default(),
            created_at: record.non_empty_string("created_at"),
        }
    }
}
