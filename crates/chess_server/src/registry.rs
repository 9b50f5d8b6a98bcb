use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::session::Session;
use crate::store::{GameId, GameRecord, GameStore, StoreError};

/// One game's authoritative state plus its live connections, guarded by a
/// single lock so every command runs as one critical section against both.
#[derive(Debug)]
pub struct GameRoom {
    pub record: GameRecord,
    pub session: Session,
}

/// All open rooms. The outer lock is held only long enough to clone a
/// room's `Arc`, never across a room operation.
#[derive(Default)]
pub struct SessionRegistry {
    rooms: RwLock<HashMap<GameId, Arc<Mutex<GameRoom>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry::default()
    }

    /// The room for `game_id`, if anyone has opened it.
    pub async fn lookup(&self, game_id: GameId) -> Option<Arc<Mutex<GameRoom>>> {
        self.rooms.read().await.get(&game_id).cloned()
    }

    /// The room for `game_id`, seeded from the store on first open. An
    /// already-open room keeps its in-memory record, which is the authority
    /// over whatever the store holds.
    pub async fn open(
        &self,
        game_id: GameId,
        store: &dyn GameStore,
    ) -> Result<Arc<Mutex<GameRoom>>, StoreError> {
        if let Some(room) = self.lookup(game_id).await {
            return Ok(room);
        }

        let record = store.load_game(game_id).await?;

        let mut rooms = self.rooms.write().await;
        // Lost the open race to another connection: use theirs.
        if let Some(room) = rooms.get(&game_id) {
            return Ok(room.clone());
        }
        let room = Arc::new(Mutex::new(GameRoom {
            record,
            session: Session::new(game_id),
        }));
        rooms.insert(game_id, room.clone());
        Ok(room)
    }
}
