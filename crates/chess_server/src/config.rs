use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Server settings, read from an optional TOML file. Every field has a
/// default; `CHESS_SERVER_ADDR` overrides the bind address last.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to.
    pub bind_addr: String,
    /// Static token -> account name table for authentication.
    pub tokens: HashMap<String, String>,
    /// Create one empty game at startup and log its id so clients can join.
    pub seed_demo_game: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "127.0.0.1:8080".to_string(),
            tokens: HashMap::new(),
            seed_demo_game: true,
        }
    }
}

impl ServerConfig {
    /// Parse one TOML config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Defaults, then the config file if one was named, then the
    /// environment override.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Ok(addr) = std::env::var("CHESS_SERVER_ADDR") {
            config.bind_addr = addr;
        }
        Ok(config)
    }
}
