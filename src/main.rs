use api_client::HeadHunterClient;
use clap::Parser;
use configuration::{Config, LoggingConfig, load_config};
use database::{DbRepository, connect, create_database};
use ingestor::Ingestor;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod menu;
mod report;

/// The main entry point for the hh-analyst application.
#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = init_tracing(&config.logging);

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Run failed.");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Loads employers and their salaried vacancies from hh.ru into PostgreSQL
/// and answers one report query.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Keep the existing database and go straight to the menu.
    #[arg(long)]
    skip_ingest: bool,
}

// ==============================================================================
// Run Logic
// ==============================================================================

/// Bootstraps the database, ingests the configured employers and answers
/// exactly one menu selection.
async fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let db_config = &config.database;

    if !cli.skip_ingest {
        create_database(&db_config.name, db_config).await?;
    }

    let db_repo = DbRepository::new(connect(db_config).await?);

    if !cli.skip_ingest {
        let api_client = HeadHunterClient::new(&config.api)?;
        let ingestor = Ingestor::new(Arc::new(api_client), db_repo.clone());
        let summary = ingestor
            .save_data_to_database(&config.ingest.employer_ids)
            .await?;
        tracing::info!(
            employers = summary.employers,
            vacancies = summary.vacancies,
            database = %db_config.name,
            "Data saved."
        );
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let selection = menu::prompt_selection(&mut stdin.lock(), &mut stdout.lock())?;
    report::run_selection(&selection, &db_repo, &mut stdout.lock()).await?;

    db_repo.pool().close().await;
    Ok(())
}

/// Console logs go to stderr so stdout carries only the menu and reports.
/// When `logging.directory` is set, a daily rolling file receives the same events.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "hh-analyst.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
