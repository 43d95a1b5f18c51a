use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matrix_scaffold::{build_server, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first: DEBUG decides the default log level
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        debug = config.logging.debug,
        error_format = %config.errors.format,
        "Configuration loaded successfully"
    );

    let server = build_server(config).context("Failed to register routes")?;
    info!(routes = server.routes().len(), "Routes registered");

    server.start().await.context("Server error")?;

    Ok(())
}
