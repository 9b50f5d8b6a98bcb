pub mod board;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod types;

// Re-export the rule-engine surface under the crate root
pub use board::*;
pub use game::*;
pub use movegen::{pseudo_legal_moves, pseudo_legal_moves_into};
pub use perft::perft;
pub use rules::*;
pub use types::*;
