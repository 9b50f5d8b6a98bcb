//! Chess service binary.
//!
//! Bring-up: read config, wire the in-memory auth and store into the
//! handler, serve the WebSocket router.

use std::env;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_server::auth::{AuthProvider, StaticTokenAuth};
use chess_server::config::ServerConfig;
use chess_server::handler::ProtocolHandler;
use chess_server::store::{GameStore, InMemoryGameStore};
use chess_server::ws;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = env::args().nth(1);
    let config = ServerConfig::load(config_path.as_deref().map(Path::new))?;
    if config.tokens.is_empty() {
        info!("no auth tokens configured, every join will be rejected");
    }

    let auth: Arc<dyn AuthProvider> = Arc::new(StaticTokenAuth::new(config.tokens.clone()));
    let store: Arc<dyn GameStore> = Arc::new(InMemoryGameStore::new());

    if config.seed_demo_game {
        let game_id = store.create_game().await;
        info!(%game_id, "seeded demo game");
    }

    let handler = Arc::new(ProtocolHandler::new(auth, store));
    let app = ws::router(handler);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
