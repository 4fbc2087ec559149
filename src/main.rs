use clap::Parser;
use dotenvy::dotenv;
use outreach_tracker::{cli::Cli, config::app::load_app_configuration, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Parse the command before touching any data
    let cli = Cli::parse();

    // 4. Load the application configuration
    let app_config = load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 5. Run the command
    outreach_tracker::cli::run(cli, &app_config)
        .inspect_err(|e| error!("Command failed: {}", e))
}
