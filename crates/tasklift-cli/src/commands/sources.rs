use clap::Args;
use colored::Colorize;
use tasklift_import_monday::MONDAY_IMPORTER;

#[derive(Args)]
pub struct SourcesCommand {
    /// Print the descriptors as JSON
    #[arg(long)]
    pub json: bool,
}

impl SourcesCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let importers = [MONDAY_IMPORTER];

        if self.json {
            println!("{}", serde_json::to_string_pretty(&importers)?);
            return Ok(());
        }

        for importer in importers {
            println!(
                "{} {}",
                importer.code.bright_cyan().bold(),
                format!("({})", importer.name).bright_white()
            );
            println!("  {} {}", "Credentials:".bright_white(), importer.url);
            println!(
                "  {} {}",
                "Inputs:".bright_white(),
                importer.input_fields.join(", ")
            );
        }
        Ok(())
    }
}
