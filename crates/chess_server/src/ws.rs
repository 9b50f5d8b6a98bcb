use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::handler::ProtocolHandler;
use crate::protocol::{ClientCommand, ServerMessage};
use crate::session::ConnectionId;
use crate::store::GameId;

/// The service router: one WebSocket endpoint.
pub fn router(handler: Arc<ProtocolHandler>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(handler): State<Arc<ProtocolHandler>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, handler))
}

/// One connection: a spawned writer draining the outbound queue, and this
/// reader loop feeding parsed commands to the handler. A frame that fails
/// to parse gets an `error` reply and the connection stays open.
async fn handle_socket(socket: WebSocket, handler: Arc<ProtocolHandler>) {
    let conn: ConnectionId = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    info!(%conn, "connection opened");

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(err) => {
                    error!(%err, "failed to encode outbound message");
                    continue;
                }
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Games this connection joined, so the close path knows whom to tell.
    let mut joined: HashSet<GameId> = HashSet::new();

    while let Some(Ok(msg)) = stream.next().await {
        let text = match msg {
            Message::Text(t) => t.to_string(),
            Message::Close(_) => break,
            _ => continue,
        };

        let cmd: ClientCommand = match serde_json::from_str(&text) {
            Ok(cmd) => cmd,
            Err(err) => {
                let _ = tx.send(ServerMessage::Error {
                    text: format!("invalid message: {err}"),
                });
                continue;
            }
        };

        let game_id = cmd.game_id();
        let is_join = matches!(
            cmd,
            ClientCommand::JoinPlayer { .. } | ClientCommand::JoinObserver { .. }
        );
        let is_leave = matches!(cmd, ClientCommand::Leave { .. });

        match handler.handle(conn, &tx, cmd).await {
            Ok(()) => {
                if is_join {
                    joined.insert(game_id);
                } else if is_leave {
                    joined.remove(&game_id);
                }
            }
            Err(err) => {
                debug!(%conn, %game_id, %err, "command rejected");
                let _ = tx.send(ServerMessage::Error {
                    text: err.to_string(),
                });
            }
        }
    }

    let joined: Vec<GameId> = joined.into_iter().collect();
    handler.handle_disconnect(conn, &joined).await;
    drop(tx);
    let _ = writer.await;
    info!(%conn, "connection closed");
}
