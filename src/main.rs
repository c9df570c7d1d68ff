use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codepair::adapters::http::{app_router, RouterConfig};
use codepair::adapters::websocket::{Broadcaster, ConnectionRegistry};
use codepair::adapters::{InMemoryRoomStore, PostgresRoomStore};
use codepair::config::AppConfig;
use codepair::ports::RoomStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let store: Arc<dyn RoomStore> = match &config.database {
        Some(database) => {
            let store = PostgresRoomStore::connect(database).await?;
            tracing::info!(migrations = database.run_migrations, "Using PostgreSQL room store");
            Arc::new(store)
        }
        None => {
            tracing::info!("No database configured, rooms are kept in memory");
            Arc::new(InMemoryRoomStore::new())
        }
    };

    let registry = Arc::new(ConnectionRegistry::new());
    let broadcaster = Broadcaster::new(registry.clone(), config.realtime.send_timeout());

    let router = app_router(
        store,
        broadcaster,
        &RouterConfig {
            cors_origins: config.server.cors_origins_list(),
            request_timeout: config.server.request_timeout(),
            outbound_buffer: config.realtime.outbound_buffer,
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Codepair server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(
        open_rooms = registry.active_rooms().await.len(),
        connections = registry.total_connections().await,
        "Shutting down"
    );
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl+c");
    }
}
