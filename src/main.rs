//! Travel Console
//!
//! Operator console for the travel catalog backend: manage destinations and hotels,
//! and browse hotels by destination.

use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use travel_console::console::Console;
use travel_console::{CatalogClient, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Travel Console");
    tracing::info!("Catalog API: {}", config.api_url);

    let client = CatalogClient::new(&config)?;
    let mut console = Console::new(client, &config);

    console
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    tracing::info!("Console closed");
    Ok(())
}
