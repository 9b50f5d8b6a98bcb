//! Networked two-player chess service.
//!
//! This crate is the session layer over `chess_core`:
//! - Decoding and dispatching client commands (`protocol`, `handler`)
//! - Per-game connection tracking and broadcast (`session`, `registry`)
//! - Identity and persistence boundaries with in-memory implementations
//!   (`auth`, `store`)
//! - The WebSocket transport and the server binary (`ws`, `main`)
//!
//! Every command runs as one critical section against its game's room, so
//! two near-simultaneous moves can never both pass legality against a
//! stale board.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod store;
pub mod ws;

pub use error::CommandError;
pub use handler::ProtocolHandler;
pub use protocol::{ClientCommand, GameView, ServerMessage};
