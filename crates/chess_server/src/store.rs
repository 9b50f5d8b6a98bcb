use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use chess_core::{Color, Game};

/// Identifier for one game, shared by the store, the registry, and the wire.
pub type GameId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no such game")]
    NotFound,
}

/// A game as persisted: the position plus who holds each seat. Seats live
/// here rather than in the session because seat uniqueness is checked
/// against the stored game, not against whoever happens to be connected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: Game,
    pub white_player: Option<String>,
    pub black_player: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GameRecord {
    /// A fresh record: starting position, both seats vacant.
    pub fn new() -> Self {
        GameRecord {
            game: Game::new(),
            white_player: None,
            black_player: None,
            created_at: Utc::now(),
        }
    }

    /// The account holding `side`'s seat, if claimed.
    pub fn seat(&self, side: Color) -> Option<&str> {
        match side {
            Color::White => self.white_player.as_deref(),
            Color::Black => self.black_player.as_deref(),
        }
    }

    pub fn set_seat(&mut self, side: Color, username: String) {
        match side {
            Color::White => self.white_player = Some(username),
            Color::Black => self.black_player = Some(username),
        }
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        GameRecord::new()
    }
}

/// Game persistence boundary. The in-memory room is authoritative while a
/// session is live; the store is written at transition points (seat claims,
/// applied moves, resignations).
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Create and persist a fresh game, returning its id.
    async fn create_game(&self) -> GameId;
    async fn load_game(&self, game_id: GameId) -> Result<GameRecord, StoreError>;
    async fn save_game(&self, game_id: GameId, record: &GameRecord) -> Result<(), StoreError>;
}

/// Process-local store. A SQL-backed store would implement the same trait.
#[derive(Default)]
pub struct InMemoryGameStore {
    games: RwLock<HashMap<GameId, GameRecord>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        InMemoryGameStore::default()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn create_game(&self) -> GameId {
        let game_id = Uuid::new_v4();
        self.games.write().await.insert(game_id, GameRecord::new());
        game_id
    }

    async fn load_game(&self, game_id: GameId) -> Result<GameRecord, StoreError> {
        self.games
            .read()
            .await
            .get(&game_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save_game(&self, game_id: GameId, record: &GameRecord) -> Result<(), StoreError> {
        self.games.write().await.insert(game_id, record.clone());
        Ok(())
    }
}
