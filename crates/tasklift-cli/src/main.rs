//! Tasklift CLI - one-shot imports into a destination team

mod commands;

use clap::{Parser, Subcommand};
use commands::{ImportCommand, SourcesCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "TASKLIFT_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "TASKLIFT_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import every board of a monday.com account into a team
    Import(ImportCommand),
    /// List the available import sources
    Sources(SourcesCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes full control when set
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG environment variable: {}", e))?
    } else {
        tracing_subscriber::EnvFilter::new(format!(
            "tasklift={level},\
             tasklift_cli={level},\
             tasklift_import={level},\
             tasklift_import_types={level},\
             tasklift_import_monday={level},\
             tasklift_nozbe={level},\
             h2=warn,\
             hyper=warn,\
             hyper_util=warn,\
             reqwest=warn,\
             rustls=warn",
            level = cli.log_level
        ))
    };

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global default subscriber: {}", e))?;

    match cli.command {
        Commands::Import(import_cmd) => import_cmd.execute(),
        Commands::Sources(sources_cmd) => sources_cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_arguments() {
        let cli = Cli::try_parse_from([
            "tasklift",
            "import",
            "--team-id",
            "team-1",
            "--destination-token",
            "token",
            "--source-app-key",
            "key",
            "--source-url",
            "http://localhost:9090/v2",
        ])
        .unwrap();

        match cli.command {
            Commands::Import(cmd) => {
                assert_eq!(cmd.team_id, "team-1");
                assert_eq!(cmd.source_url, "http://localhost:9090/v2");
                assert_eq!(cmd.destination_url, "https://api4.nozbe.com/v1/api");
                assert_eq!(cmd.request_timeout, 30);
            }
            Commands::Sources(_) => panic!("Expected import command"),
        }
    }

    #[test]
    fn test_log_options_are_global() {
        let cli = Cli::try_parse_from(["tasklift", "sources", "--log-level", "debug", "--json"])
            .unwrap();

        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Sources(SourcesCommand { json: true })));
    }
}
