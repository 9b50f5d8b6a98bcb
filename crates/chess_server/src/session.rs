use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use chess_core::Color;

use crate::protocol::ServerMessage;
use crate::store::GameId;

/// Identifier for one live connection.
pub type ConnectionId = Uuid;

/// What a connection may do in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Player(Color),
    Observer,
}

/// One live connection's membership in a session.
#[derive(Clone, Debug)]
pub struct Participant {
    pub username: String,
    pub role: Role,
    /// Outbound queue, drained by the connection's writer task.
    pub tx: mpsc::UnboundedSender<ServerMessage>,
}

/// The live connections watching or playing one game. Sessions carry no
/// game state of their own; the board lives in the room's record.
#[derive(Debug)]
pub struct Session {
    game_id: GameId,
    participants: HashMap<ConnectionId, Participant>,
}

impl Session {
    pub fn new(game_id: GameId) -> Self {
        Session {
            game_id,
            participants: HashMap::new(),
        }
    }

    /// Insert or replace a connection's entry.
    pub fn join(&mut self, conn: ConnectionId, participant: Participant) {
        self.participants.insert(conn, participant);
    }

    /// Remove a connection, returning its entry. Removing a non-member is a
    /// no-op.
    pub fn leave(&mut self, conn: ConnectionId) -> Option<Participant> {
        self.participants.remove(&conn)
    }

    pub fn get(&self, conn: ConnectionId) -> Option<&Participant> {
        self.participants.get(&conn)
    }

    pub fn contains(&self, conn: ConnectionId) -> bool {
        self.participants.contains_key(&conn)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Queue `message` to every participant except `exclude`. A closed
    /// recipient is logged and skipped; delivery to the rest continues.
    /// Actual network I/O belongs to each connection's writer task.
    pub fn broadcast(&self, message: &ServerMessage, exclude: Option<ConnectionId>) {
        for (conn, participant) in &self.participants {
            if Some(*conn) == exclude {
                continue;
            }
            if participant.tx.send(message.clone()).is_err() {
                warn!(
                    game_id = %self.game_id,
                    conn = %conn,
                    username = %participant.username,
                    "dropping broadcast to closed connection"
                );
            }
        }
    }
}
