//! Wire messages. Everything crossing the WebSocket is one of these,
//! JSON-encoded and tagged with a `type` field.

use serde::{Deserialize, Serialize};

use chess_core::{Board, Color, GameResult, GameStatus, Move};

use crate::store::{GameId, GameRecord};

/// Commands a client sends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Claim (or reconnect to) a seat and join the game's session.
    JoinPlayer {
        auth_token: String,
        game_id: GameId,
        side: Color,
    },
    /// Join the session to watch, without a seat.
    JoinObserver { auth_token: String, game_id: GameId },
    MakeMove {
        auth_token: String,
        game_id: GameId,
        #[serde(rename = "move")]
        mv: Move,
    },
    /// Drop out of the session. Carries a token like every other command but
    /// is honored without an identity lookup; the connection itself says who
    /// is leaving.
    Leave { auth_token: String, game_id: GameId },
    Resign { auth_token: String, game_id: GameId },
}

impl ClientCommand {
    /// The game a command addresses.
    pub fn game_id(&self) -> GameId {
        match self {
            ClientCommand::JoinPlayer { game_id, .. }
            | ClientCommand::JoinObserver { game_id, .. }
            | ClientCommand::MakeMove { game_id, .. }
            | ClientCommand::Leave { game_id, .. }
            | ClientCommand::Resign { game_id, .. } => *game_id,
        }
    }
}

/// Frames the server sends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Human-readable event text: joins, leaves, check, game over.
    Notification { text: String },
    /// Full game-state push; replaces whatever the client renders.
    LoadGame { game: GameView },
    Error { text: String },
}

/// Everything a client needs to render one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: GameId,
    pub board: Board,
    pub status: GameStatus,
    pub result: Option<GameResult>,
    pub white_player: Option<String>,
    pub black_player: Option<String>,
}

impl GameView {
    /// Snapshot a record for the wire.
    pub fn from_record(game_id: GameId, record: &GameRecord) -> Self {
        GameView {
            game_id,
            board: record.game.board().clone(),
            status: record.game.status(),
            result: record.game.result(),
            white_player: record.white_player.clone(),
            black_player: record.black_player.clone(),
        }
    }
}
