use clap::Args;
use colored::Colorize;
use std::time::Duration;
use tasklift_import::{run_import_with_config, ImportConfig, ImportOutcome};
use tasklift_import_monday::{DEFAULT_MONDAY_API_URL, MONDAY_IMPORTER};
use tasklift_import_types::mask_secret;
use tasklift_nozbe::DEFAULT_NOZBE_API_URL;
use tracing::{debug, info};

#[derive(Args)]
pub struct ImportCommand {
    /// Destination team to import into
    #[arg(long, env = "TASKLIFT_TEAM_ID")]
    pub team_id: String,

    /// Destination API access token
    #[arg(long, env = "TASKLIFT_DESTINATION_TOKEN", hide_env_values = true)]
    pub destination_token: String,

    /// monday.com API token
    #[arg(long, env = "TASKLIFT_SOURCE_APP_KEY", hide_env_values = true)]
    pub source_app_key: String,

    /// Destination API base URL
    #[arg(long, env = "TASKLIFT_DESTINATION_URL", default_value = DEFAULT_NOZBE_API_URL)]
    pub destination_url: String,

    /// monday.com API URL
    #[arg(long, env = "TASKLIFT_SOURCE_URL", default_value = DEFAULT_MONDAY_API_URL)]
    pub source_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "TASKLIFT_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,
}

fn print_outcome(team_id: &str, outcome: &ImportOutcome) {
    println!();
    println!(
        "{}",
        format!("Import into team {} complete", team_id)
            .bright_green()
            .bold()
    );
    let rows = [
        ("Projects", outcome.projects),
        ("Sections", outcome.sections),
        ("Tasks", outcome.tasks),
        ("Comments", outcome.comments),
    ];
    for (label, counts) in rows {
        let skipped = if counts.skipped > 0 {
            format!("{} skipped", counts.skipped).bright_yellow()
        } else {
            "0 skipped".normal()
        };
        println!(
            "  {:<10} {} created, {}",
            label.bright_white(),
            counts.created.to_string().bright_cyan(),
            skipped
        );
    }
    println!(
        "  {:<10} {:.1}s",
        "Duration".bright_white(),
        outcome.duration_seconds
    );
    println!();
}

impl ImportCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        info!(
            "Importing from {} into team {}",
            MONDAY_IMPORTER.name, self.team_id
        );
        debug!(
            "Destination token {}, source app key {}",
            mask_secret(&self.destination_token),
            mask_secret(&self.source_app_key)
        );

        let config = ImportConfig::default()
            .with_destination_url(&self.destination_url)
            .with_source_url(&self.source_url)
            .with_request_timeout(Duration::from_secs(self.request_timeout));

        let rt = tokio::runtime::Runtime::new()?;
        let outcome = rt.block_on(run_import_with_config(
            &self.destination_token,
            &self.source_app_key,
            &self.team_id,
            &config,
        ))?;

        print_outcome(&self.team_id, &outcome);
        Ok(())
    }
}
