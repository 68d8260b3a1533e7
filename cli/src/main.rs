//! Rewards Admin - command-line console for the rewards platform

mod args;
mod commands;
mod prompt;
mod render;
mod state;

use args::{Cli, Commands};
use clap::Parser;
use rewards_admin_core::Error;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rewards_admin=info,rewards_admin_engine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let state = AppState::from_cli(&cli);
    tracing::debug!("Data directory: {}", state.data_dir.display());

    if let Err(e) = run(cli.command, &state).await {
        report(&e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, state: &AppState) -> anyhow::Result<()> {
    match command {
        Commands::Session { command } => commands::session::run(command, state).await,
        Commands::Challenges { command } => commands::challenges::run(command, state).await,
        Commands::Multipliers { command } => commands::bonuses::multipliers(command, state).await,
        Commands::BonusDays { command } => commands::bonuses::bonus_days(command, state).await,
        Commands::Streak { command } => commands::bonuses::streak(command, state).await,
        Commands::PauseRules { command } => commands::bonuses::pause_rules(command, state).await,
        Commands::Games { command } => commands::catalog::games(command, state).await,
        Commands::Offers { command } => commands::catalog::offers(command, state).await,
        Commands::Tasks { command } => commands::catalog::tasks(command, state).await,
        Commands::Integrations { command } => commands::integrations::run(command, state).await,
        Commands::MasterData { table } => commands::master_data::run(table, state).await,
    }
}

/// Print an error the way a user needs it: server text for API errors,
/// one line per field for validation errors.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(Error::Validation(errors)) => {
            eprintln!("error: the form has problems");
            if let Some(form) = errors.form() {
                eprintln!("  {form}");
            }
            for (field, message) in errors.fields() {
                eprintln!("  {field}: {message}");
            }
        }
        Some(api_err) => eprintln!("error: {}", api_err.user_message()),
        None => eprintln!("error: {err:#}"),
    }
}
