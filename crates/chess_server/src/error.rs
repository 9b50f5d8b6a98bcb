use thiserror::Error;

use chess_core::GameError;

use crate::auth::AuthError;
use crate::store::StoreError;

/// Why a client command was refused. The display text of each variant is
/// exactly what goes back to the client in an `error` frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("game not found")]
    GameNotFound,
    #[error("game is already finished")]
    GameFinished,
    #[error("illegal move")]
    IllegalMove,
    /// The sender addressed a game it never joined.
    #[error("not joined to this game")]
    NotJoined,
    /// Another account already holds the requested seat.
    #[error("seat is already taken")]
    SeatTaken,
    /// Observers watch; they do not move or resign.
    #[error("observers cannot play")]
    PlayersOnly,
}

impl From<GameError> for CommandError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::IllegalMove => CommandError::IllegalMove,
            GameError::GameFinished => CommandError::GameFinished,
        }
    }
}

impl From<AuthError> for CommandError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownToken => CommandError::Unauthorized,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CommandError::GameNotFound,
        }
    }
}
