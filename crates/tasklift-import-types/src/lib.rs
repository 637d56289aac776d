//! Core types and traits for the Tasklift import system
//!
//! This crate provides the foundational abstractions for moving project data
//! (projects, sections, tasks, comments) from a source platform into a
//! destination task-management team.
//!
//! # Architecture
//!
//! - **Traits**: `SourceClient` and `DestinationClient` define the collaborators
//!   the import pipeline talks to
//! - **Records**: loosely-typed source records and typed views over them
//! - **Models**: destination creation payloads with read-only fields stripped on the wire
//! - **Quota**: destination plan limits and the guard that enforces them
//! - **Errors**: unified error handling across all importers
//!
//! # Usage
//!
//! Client implementations (e.g., `tasklift-import-monday`) depend on this crate
//! and implement one of the collaborator traits.

pub mod clients;
pub mod error;
pub mod ids;
pub mod models;
pub mod quota;
pub mod records;
pub mod timestamp;
pub mod utils;

pub use clients::{DestinationClient, SourceClient, TeamProject};
pub use error::{ImportError, ImportResult};
pub use ids::{new_id, EntityId, TeamId, ID_LENGTH};
pub use models::{Comment, Project, ProjectSection, Task, PLACEHOLDER_TIMESTAMP};
pub use quota::{check_limits, QuotaCategory, QuotaSnapshot};
pub use records::{
    BoardKind, ProjectState, SourceComment, SourceProject, SourceRecord, SourceSection, SourceTask,
};
pub use timestamp::parse_timestamp;
pub use utils::mask_secret;
