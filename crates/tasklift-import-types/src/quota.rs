//! Destination plan limits

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ImportError, ImportResult};

/// Limit category enforced before a creation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaCategory {
    /// Open (not ended) projects in the team
    ProjectsOpen,
    /// Sections within a single project
    ProjectSections,
}

impl QuotaCategory {
    pub fn as_str(&self) -> &str {
        match self {
            QuotaCategory::ProjectsOpen => "projects_open",
            QuotaCategory::ProjectSections => "project_sections",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "projects_open" => Some(QuotaCategory::ProjectsOpen),
            "project_sections" => Some(QuotaCategory::ProjectSections),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuotaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caps and current usage fetched once at the start of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotaSnapshot {
    caps: HashMap<QuotaCategory, i64>,
    usage: HashMap<QuotaCategory, usize>,
}

impl QuotaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cap(mut self, category: QuotaCategory, cap: i64) -> Self {
        self.caps.insert(category, cap);
        self
    }

    /// Build a snapshot from the destination's limits object
    ///
    /// Unknown categories and non-integer caps are ignored. A JSON-encoded
    /// string holding the object is accepted as well.
    pub fn from_limits(limits: &Value) -> Self {
        let parsed;
        let limits = match limits {
            Value::String(raw) => {
                parsed = serde_json::from_str::<Value>(raw).unwrap_or(Value::Null);
                &parsed
            }
            other => other,
        };

        let mut snapshot = Self::new();
        if let Some(object) = limits.as_object() {
            for (key, value) in object {
                if let (Some(category), Some(cap)) = (QuotaCategory::from_str(key), value.as_i64())
                {
                    snapshot.caps.insert(category, cap);
                }
            }
        }
        snapshot
    }

    /// Cap for a category; `None` means unlimited
    pub fn cap(&self, category: QuotaCategory) -> Option<i64> {
        self.caps.get(&category).copied().filter(|cap| *cap >= 0)
    }

    pub fn record_usage(&mut self, category: QuotaCategory, count: usize) {
        self.usage.insert(category, count);
    }

    pub fn usage(&self, category: QuotaCategory) -> usize {
        self.usage.get(&category).copied().unwrap_or(0)
    }

    /// Count after `incoming` entities are added to the recorded usage
    pub fn projected(&self, category: QuotaCategory, incoming: usize) -> usize {
        self.usage(category) + incoming
    }
}

/// Fail with `QuotaExceeded` when recorded usage plus `incoming` is above
/// the category cap
pub fn check_limits(
    snapshot: &QuotaSnapshot,
    category: QuotaCategory,
    incoming: usize,
) -> ImportResult<()> {
    let projected = snapshot.projected(category, incoming);
    match snapshot.cap(category) {
        Some(limit) if projected as i64 > limit => Err(ImportError::QuotaExceeded {
            category: category.to_string(),
            projected,
            limit,
        }),
        _ => Ok(()),
    }
}
