//! Rolecall CLI binary.
//!
//! - Run the Discord bot
//! - Apply database migrations
//! - Inspect a guild's stored role configuration

use clap::Parser;
use rolecall::{DiscordCredentials, Settings, database_url_from_env};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    // Secrets may live in .env during development
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    #[cfg(feature = "observability")]
    let provider = rolecall::observability::init_observability(
        rolecall::observability::ObservabilityConfig::default()
            .with_verbose(cli.verbose)
            .with_json_logs(cli.json_logs),
    )?;
    #[cfg(not(feature = "observability"))]
    rolecall::telemetry::init_logging(cli.verbose, cli.json_logs)?;

    let settings = Settings::load(cli.config.as_deref())?;
    let database_url = database_url_from_env()?;

    match cli.command {
        Commands::Run => {
            let credentials = DiscordCredentials::from_env()?;
            rolecall::run_bot(&credentials, &database_url, &settings).await?;
        }

        Commands::Migrate => {
            let applied = rolecall::run_migrate(&database_url, &settings).await?;
            println!("Applied {} migration(s)", applied);
        }

        Commands::Show { guild } => {
            let config = rolecall::show_guild(&database_url, &settings, &guild).await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    #[cfg(feature = "observability")]
    rolecall::observability::shutdown_observability(provider);

    Ok(())
}
