//! `mailintake` - Inbound submission triage
//!
//! Inspect the keyword queries and document checklists that drive a
//! triage run.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailintake_core::{
    IntakeConfig, TriageLedger, default_config_path, find_missing, format_missing_with,
    validate_config,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "mailintake",
    version,
    about = "Triage inbound email submissions",
    after_help = "Configuration is read from $MAILINTAKE_CONFIG or the user config directory."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the search query of every submission type (default)
    Query,

    /// List the documents missing from a set of attachments
    Check {
        /// Submission type name
        submission_type: String,
        /// Attachment files; only the file name is compared
        files: Vec<PathBuf>,
    },

    /// Check the configuration file
    Validate,

    /// Show processed submission counts
    Stats,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailintake=info,mailintake_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = default_config_path();
    let config = IntakeConfig::load(&config_path)
        .await
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    info!("Loaded {} submission types", config.submission_types.len());

    match cli.command.unwrap_or(Command::Query) {
        Command::Query => Ok(print_queries(&config)),
        Command::Check {
            submission_type,
            files,
        } => check(&config, &submission_type, &files),
        Command::Validate => Ok(validate(&config)),
        Command::Stats => stats().await,
    }
}

fn print_queries(config: &IntakeConfig) -> ExitCode {
    let expander = config.expander();
    for submission in &config.submission_types {
        let keywords = expander.expand(&submission.keywords);
        match keywords.to_search_query(&config.search_filters) {
            Some(query) => println!("{}: {query}", submission.name),
            None => println!("{}: (no keywords)", submission.name),
        }
    }
    ExitCode::SUCCESS
}

/// Reduces each path to its file name, as it would appear on an attachment.
fn attachment_names(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|path| {
            path.file_name()
                .unwrap_or(path.as_os_str())
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

fn check(config: &IntakeConfig, submission_type: &str, files: &[PathBuf]) -> Result<ExitCode> {
    let submission = config.submission_type(submission_type)?;

    let names = attachment_names(files);
    let missing = find_missing(&submission.documents, names.as_slice());
    if missing.is_empty() {
        println!("All required documents received for '{}'", submission.name);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Missing for '{}':", submission.name);
    print!("{}", format_missing_with(missing, "\n"));
    Ok(ExitCode::FAILURE)
}

fn validate(config: &IntakeConfig) -> ExitCode {
    match validate_config(config) {
        Ok(()) => {
            println!("Configuration OK");
            ExitCode::SUCCESS
        }
        Err(issues) => {
            for issue in &issues {
                println!("{}: {issue}", issue.field());
            }
            ExitCode::FAILURE
        }
    }
}

fn ledger_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailintake")
        .join("ledger.db")
}

fn database_url_path(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("ledger path {} is not valid UTF-8", path.display()))
}

async fn stats() -> Result<ExitCode> {
    let path = ledger_path();
    if !path.exists() {
        println!("No submissions processed yet");
        return Ok(ExitCode::SUCCESS);
    }

    let ledger = TriageLedger::new(database_url_path(&path)?)
        .await
        .context("opening ledger")?;
    let stats = ledger.stats().await?;
    println!(
        "{} processed: {} accepted, {} incomplete",
        stats.total, stats.accepted, stats.incomplete
    );
    Ok(ExitCode::SUCCESS)
}
