use clap::Parser;
use dca_ladder::cli::{Cli, Commands};
use dca_ladder::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    dca_ladder::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Simulate(args) => {
            args.execute()?;
        }
        Commands::Execute(args) => {
            tracing::info!("Starting paper batch execution");
            args.execute(&config).await?;
        }
    }

    Ok(())
}
