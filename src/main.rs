use clap::Parser;

use recipe_store::cli::{self, Cli, execute_command};
use recipe_store::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match cli::load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logger(settings.logger.clone().into_logger_config()?)?;
    tracing::debug!(
        application = %settings.application.name,
        version = %settings.application.version,
        "Configuration loaded"
    );

    if let Err(e) = execute_command(&cli, settings).await {
        tracing::error!(error = ?e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
