//! Tragres CLI - Main entry point

use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing::error;
use tragres_cli::api::ApiClient;
use tragres_cli::commands::attendance::MarkRequest;
use tragres_cli::config::Config;
use tragres_cli::store::{ApiStore, StudentStore};
use tragres_cli::{AssignmentsCommand, AttendanceCommand, Cli, Commands, StudentsCommand};
use tragres_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Warnings only by default; --verbose shows each request
    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("tragres-cli")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().with_env_overrides().unwrap_or(log_config);

    // The CLI works without logging; keep the guard so file output is flushed
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> tragres_cli::Result<()> {
    let config = Config::from_env()?.with_api_url(&cli.api_url);
    let client = ApiClient::from_config(&config)?;

    let store: Arc<dyn StudentStore> = Arc::new(ApiStore::new(client.clone()));

    match &cli.command {
        Commands::Status => tragres_cli::commands::status::run(&client).await,

        Commands::Dashboard => tragres_cli::commands::dashboard::run(store).await,

        Commands::Students { command } => match command {
            StudentsCommand::List { search } => {
                tragres_cli::commands::students::list(store, search.clone()).await
            }
            StudentsCommand::Show { id } => {
                tragres_cli::commands::students::show(store, id.clone()).await
            }
            StudentsCommand::Add {
                name,
                phone,
                course,
                email,
                photo,
            } => {
                tragres_cli::commands::students::add(
                    store,
                    name.clone(),
                    phone.clone(),
                    course.clone(),
                    email.clone(),
                    photo.clone(),
                )
                .await
            }
            StudentsCommand::Update { id, fields } => {
                tragres_cli::commands::students::update(store, id.clone(), fields.clone()).await
            }
            StudentsCommand::Delete { id } => {
                tragres_cli::commands::students::delete(store, id.clone()).await
            }
        },

        Commands::Attendance { command } => match command {
            AttendanceCommand::Show { date } => {
                tragres_cli::commands::attendance::show(store, date.clone()).await
            }
            AttendanceCommand::Save {
                date,
                present,
                absent,
                topic,
                notes,
            } => {
                let request = MarkRequest {
                    present: present.clone(),
                    absent: absent.clone(),
                    topic: topic.clone(),
                    notes: notes.clone(),
                };
                tragres_cli::commands::attendance::save(store, date.clone(), request).await
            }
        },

        Commands::Assignments { command } => match command {
            AssignmentsCommand::Add { student, title } => {
                tragres_cli::commands::assignments::add(store, student.clone(), title.clone()).await
            }
            AssignmentsCommand::Toggle { student, id } => {
                tragres_cli::commands::assignments::toggle(store, student.clone(), id.clone())
                    .await
            }
            AssignmentsCommand::Delete { student, id } => {
                tragres_cli::commands::assignments::delete(store, student.clone(), id.clone())
                    .await
            }
        },
    }
}
