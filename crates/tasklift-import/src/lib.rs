//! Tasklift Import Pipeline
//!
//! This crate drives a one-shot import of projects, sections, tasks and
//! comments from a source platform into a destination team.
//!
//! # Architecture
//!
//! - **Mapper**: pure conversions from source records to destination payloads
//! - **Services**: the pipeline orchestrator and the `run_import` entry point
//! - **Config**: endpoints and timeouts for the platform clients
//!
//! # Usage
//!
//! Call [`run_import`] with the destination token, the source app key and the
//! destination team id. Tests and embedders that bring their own clients use
//! [`ImportPipeline`] directly.

pub mod config;
pub mod identifier_map;
pub mod mapper;
pub mod services;

pub use config::ImportConfig;
pub use identifier_map::IdentifierMap;
pub use services::{
    run_import, run_import_with_config, validate_inputs, EntityCounts, ImportOutcome,
    ImportPipeline,
};
