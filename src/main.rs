//! MedAppoint CLI entry point.

use anyhow::Result;
use clap::Parser;
use medappoint::cli::{commands, Cli, Commands};
use medappoint::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may come from a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("medappoint={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Ask { message, model } => {
            commands::run_ask(message, model.clone(), settings).await?;
        }

        Commands::Chat { model } => {
            commands::run_chat(model.clone(), settings).await?;
        }

        Commands::Slots { speciality, day } => {
            commands::run_slots(speciality, day)?;
        }

        Commands::Book {
            speciality,
            day,
            time,
            patient_name,
        } => {
            commands::run_book(speciality, day, time, patient_name)?;
        }

        Commands::Doctor => {
            let path = config_path.clone().unwrap_or_else(Settings::default_config_path);
            commands::run_doctor(&path, &settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path.clone(), settings)?;
        }
    }

    Ok(())
}
