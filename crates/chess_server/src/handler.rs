use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use chess_core::{Color, Move, MoveOutcome};

use crate::auth::AuthProvider;
use crate::error::CommandError;
use crate::protocol::{ClientCommand, GameView, ServerMessage};
use crate::registry::{GameRoom, SessionRegistry};
use crate::session::{ConnectionId, Participant, Role};
use crate::store::{GameId, GameStore};

/// Turns parsed commands into game-state transitions and fan-out. One
/// instance serves every connection; all per-game state sits behind the
/// registry's room locks, so each command runs as a single critical
/// section against its game.
pub struct ProtocolHandler {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn GameStore>,
    registry: SessionRegistry,
}

impl ProtocolHandler {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn GameStore>) -> Self {
        ProtocolHandler {
            auth,
            store,
            registry: SessionRegistry::new(),
        }
    }

    /// Apply one command on behalf of `conn`. Successful responses and
    /// broadcasts are queued in here; a returned error is the caller's to
    /// report to `conn` alone. A rejected command changes no state and is
    /// never broadcast.
    pub async fn handle(
        &self,
        conn: ConnectionId,
        reply: &mpsc::UnboundedSender<ServerMessage>,
        cmd: ClientCommand,
    ) -> Result<(), CommandError> {
        match cmd {
            ClientCommand::JoinPlayer {
                auth_token,
                game_id,
                side,
            } => {
                self.join_player(conn, reply, &auth_token, game_id, side)
                    .await
            }
            ClientCommand::JoinObserver {
                auth_token,
                game_id,
            } => {
                self.join_observer(conn, reply, &auth_token, game_id)
                    .await
            }
            ClientCommand::MakeMove {
                auth_token,
                game_id,
                mv,
            } => self.make_move(conn, reply, &auth_token, game_id, mv).await,
            ClientCommand::Leave { game_id, .. } => self.leave(conn, reply, game_id).await,
            ClientCommand::Resign {
                auth_token,
                game_id,
            } => self.resign(conn, reply, &auth_token, game_id).await,
        }
    }

    /// Transport-level close: drop `conn` from every session it joined and
    /// tell the remaining participants.
    pub async fn handle_disconnect(&self, conn: ConnectionId, joined: &[GameId]) {
        for &game_id in joined {
            let Some(room) = self.registry.lookup(game_id).await else {
                continue;
            };
            let mut room = room.lock().await;
            if let Some(participant) = room.session.leave(conn) {
                info!(%game_id, %conn, username = %participant.username, "connection dropped from game");
                room.session.broadcast(
                    &ServerMessage::Notification {
                        text: format!("{} disconnected", participant.username),
                    },
                    None,
                );
            }
        }
    }

    async fn join_player(
        &self,
        conn: ConnectionId,
        reply: &mpsc::UnboundedSender<ServerMessage>,
        auth_token: &str,
        game_id: GameId,
        side: Color,
    ) -> Result<(), CommandError> {
        let username = self.auth.resolve_identity(auth_token).await?;
        let room = self.registry.open(game_id, self.store.as_ref()).await?;
        let mut room = room.lock().await;

        match room.record.seat(side) {
            None => {
                room.record.set_seat(side, username.clone());
                self.persist(game_id, &room).await;
            }
            // reconnecting to a seat this account already holds
            Some(holder) if holder == username => {}
            Some(_) => return Err(CommandError::SeatTaken),
        }

        room.session.join(
            conn,
            Participant {
                username: username.clone(),
                role: Role::Player(side),
                tx: reply.clone(),
            },
        );
        info!(%game_id, %conn, username = %username, side = %side, "player joined");

        let push = ServerMessage::LoadGame {
            game: GameView::from_record(game_id, &room.record),
        };
        deliver(reply, &push);
        room.session.broadcast(
            &ServerMessage::Notification {
                text: format!("{username} joined as {side}"),
            },
            Some(conn),
        );
        room.session.broadcast(&push, Some(conn));
        Ok(())
    }

    async fn join_observer(
        &self,
        conn: ConnectionId,
        reply: &mpsc::UnboundedSender<ServerMessage>,
        auth_token: &str,
        game_id: GameId,
    ) -> Result<(), CommandError> {
        let username = self.auth.resolve_identity(auth_token).await?;
        let room = self.registry.open(game_id, self.store.as_ref()).await?;
        let mut room = room.lock().await;

        room.session.join(
            conn,
            Participant {
                username: username.clone(),
                role: Role::Observer,
                tx: reply.clone(),
            },
        );
        info!(%game_id, %conn, username = %username, "observer joined");

        let push = ServerMessage::LoadGame {
            game: GameView::from_record(game_id, &room.record),
        };
        deliver(reply, &push);
        room.session.broadcast(
            &ServerMessage::Notification {
                text: format!("{username} is now observing"),
            },
            Some(conn),
        );
        room.session.broadcast(&push, Some(conn));
        Ok(())
    }

    async fn make_move(
        &self,
        conn: ConnectionId,
        reply: &mpsc::UnboundedSender<ServerMessage>,
        auth_token: &str,
        game_id: GameId,
        mv: Move,
    ) -> Result<(), CommandError> {
        let username = self.auth.resolve_identity(auth_token).await?;
        let room = self
            .registry
            .lookup(game_id)
            .await
            .ok_or(CommandError::NotJoined)?;
        let mut room = room.lock().await;

        let side = acting_side(&room, conn, &username)?;
        // The seat must match the turn; apply_move only checks the piece.
        if side != room.record.game.side_to_move() {
            return Err(CommandError::IllegalMove);
        }

        let outcome = room.record.game.apply_move(mv)?;
        self.persist(game_id, &room).await;
        info!(%game_id, username = %username, mv = %mv, "move applied");

        let push = ServerMessage::LoadGame {
            game: GameView::from_record(game_id, &room.record),
        };
        deliver(reply, &push);
        room.session.broadcast(&push, Some(conn));

        match outcome {
            MoveOutcome::Ongoing { check: false } => {}
            MoveOutcome::Ongoing { check: true } => {
                let checked = room.record.game.side_to_move();
                room.session.broadcast(
                    &ServerMessage::Notification {
                        text: format!("{checked} is in check"),
                    },
                    None,
                );
            }
            MoveOutcome::Checkmate { winner } => {
                room.session.broadcast(
                    &ServerMessage::Notification {
                        text: format!("checkmate, {winner} wins"),
                    },
                    None,
                );
            }
            MoveOutcome::Stalemate => {
                room.session.broadcast(
                    &ServerMessage::Notification {
                        text: "stalemate, the game is a draw".to_string(),
                    },
                    None,
                );
            }
        }
        Ok(())
    }

    async fn resign(
        &self,
        conn: ConnectionId,
        reply: &mpsc::UnboundedSender<ServerMessage>,
        auth_token: &str,
        game_id: GameId,
    ) -> Result<(), CommandError> {
        let username = self.auth.resolve_identity(auth_token).await?;
        let room = self
            .registry
            .lookup(game_id)
            .await
            .ok_or(CommandError::NotJoined)?;
        let mut room = room.lock().await;

        let side = acting_side(&room, conn, &username)?;
        room.record.game.resign(side)?;
        self.persist(game_id, &room).await;
        info!(%game_id, username = %username, side = %side, "player resigned");

        let push = ServerMessage::LoadGame {
            game: GameView::from_record(game_id, &room.record),
        };
        deliver(reply, &push);
        room.session.broadcast(&push, Some(conn));
        room.session.broadcast(
            &ServerMessage::Notification {
                text: format!("{username} resigned, {} wins", side.other()),
            },
            None,
        );
        Ok(())
    }

    /// Leaving is always a success: a connection that is not in the room,
    /// or a game nobody has opened, leaves nothing behind either way.
    async fn leave(
        &self,
        conn: ConnectionId,
        reply: &mpsc::UnboundedSender<ServerMessage>,
        game_id: GameId,
    ) -> Result<(), CommandError> {
        if let Some(room) = self.registry.lookup(game_id).await {
            let mut room = room.lock().await;
            if let Some(participant) = room.session.leave(conn) {
                info!(%game_id, %conn, username = %participant.username, "connection left game");
                room.session.broadcast(
                    &ServerMessage::Notification {
                        text: format!("{} left the game", participant.username),
                    },
                    None,
                );
            }
        }
        deliver(
            reply,
            &ServerMessage::Notification {
                text: "left the game".to_string(),
            },
        );
        Ok(())
    }

    /// Write the room's record through to the store. A failed save is
    /// logged; the in-memory room stays authoritative and the command still
    /// succeeds.
    async fn persist(&self, game_id: GameId, room: &GameRoom) {
        if let Err(err) = self.store.save_game(game_id, &room.record).await {
            error!(%game_id, %err, "failed to persist game");
        }
    }
}

/// Which seat `conn` plays in this room. Strangers and observers are
/// refused, as is a token resolving to a different account than the one
/// that joined.
fn acting_side(
    room: &GameRoom,
    conn: ConnectionId,
    username: &str,
) -> Result<Color, CommandError> {
    match room.session.get(conn) {
        None => Err(CommandError::NotJoined),
        Some(p) if p.username != username => Err(CommandError::Unauthorized),
        Some(p) => match p.role {
            Role::Player(side) => Ok(side),
            Role::Observer => Err(CommandError::PlayersOnly),
        },
    }
}

/// Queue a direct response to the originating connection. Failure means the
/// connection already closed; skip it.
fn deliver(reply: &mpsc::UnboundedSender<ServerMessage>, message: &ServerMessage) {
    if reply.send(message.clone()).is_err() {
        warn!("dropping reply to closed connection");
    }
}
