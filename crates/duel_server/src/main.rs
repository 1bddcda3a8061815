//! Duel server binary.

use anyhow::Result;
use clap::Parser;
use duel_server::{Cli, Dispatcher, Hub, RoomRegistry, ServerConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = ServerConfig::load(&cli.config)?.with_overrides(cli.host, cli.port);
    config.validate()?;

    run_server(config).await
}

/// Runs the WebSocket server until the listener fails.
async fn run_server(config: ServerConfig) -> Result<()> {
    info!(?config, "Starting duel server");

    let registry = RoomRegistry::new(*config.room_token_bytes(), *config.max_token_attempts());
    let (hub, hub_task) = Hub::spawn(Dispatcher::new(registry));
    let app = duel_server::build_router(hub);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %config.bind_address(), "Listening for players on /ws");

    let result = axum::serve(listener, app).await;
    hub_task.abort();
    result?;

    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,duel_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
