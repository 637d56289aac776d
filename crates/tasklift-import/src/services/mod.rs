//! Import orchestration services

mod orchestrator;

pub use orchestrator::{record_open_projects, ImportPipeline};

use serde::{Deserialize, Serialize};
use tasklift_import_monday::MondayClient;
use tasklift_import_types::{mask_secret, ImportError, ImportResult, TeamId};
use tasklift_nozbe::NozbeClient;
use tracing::{debug, error, info};

use crate::config::ImportConfig;

/// Created and skipped entities of one kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub created: usize,
    pub skipped: usize,
}

/// Summary of a finished import run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub projects: EntityCounts,
    pub sections: EntityCounts,
    pub tasks: EntityCounts,
    pub comments: EntityCounts,
    /// Execution duration (seconds)
    pub duration_seconds: f64,
}

/// Reject empty credentials before any network call
pub fn validate_inputs(
    destination_auth_token: &str,
    source_app_key: &str,
    destination_team_id: &str,
) -> ImportResult<()> {
    if destination_auth_token.is_empty() {
        return Err(ImportError::InputValidation(
            "Missing destination auth token".to_string(),
        ));
    }
    if source_app_key.is_empty() {
        return Err(ImportError::InputValidation(
            "Missing source app key".to_string(),
        ));
    }
    if destination_team_id.is_empty() {
        return Err(ImportError::InputValidation(
            "Missing destination team id".to_string(),
        ));
    }
    Ok(())
}

/// Import everything the source account holds into the destination team
pub async fn run_import(
    destination_auth_token: &str,
    source_app_key: &str,
    destination_team_id: &str,
) -> ImportResult<ImportOutcome> {
    run_import_with_config(
        destination_auth_token,
        source_app_key,
        destination_team_id,
        &ImportConfig::default(),
    )
    .await
}

/// Same as [`run_import`] with explicit endpoints and timeouts
pub async fn run_import_with_config(
    destination_auth_token: &str,
    source_app_key: &str,
    destination_team_id: &str,
    config: &ImportConfig,
) -> ImportResult<ImportOutcome> {
    validate_inputs(destination_auth_token, source_app_key, destination_team_id)?;

    let destination = NozbeClient::new(
        destination_auth_token,
        &config.destination_url,
        config.request_timeout,
    )?;
    let source = MondayClient::new(source_app_key, &config.source_url, config.request_timeout)?;

    info!(
        "Starting import into team {} (destination: {}, source: {})",
        destination_team_id, config.destination_url, config.source_url
    );
    debug!(
        "Using destination token {} and source app key {}",
        mask_secret(destination_auth_token),
        mask_secret(source_app_key)
    );

    let pipeline = ImportPipeline::new(&source, &destination, TeamId::new(destination_team_id));
    match pipeline.run().await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            error!("Import into team {} failed: {}", destination_team_id, e);
            Err(e)
        }
    }
}
