use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{board::Board, rules, types::*};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn win_for(color: Color) -> GameResult {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Wrong turn, no piece on the from-square, destination not reachable,
    /// or a malformed promotion.
    #[error("illegal move")]
    IllegalMove,
    #[error("game is already finished")]
    GameFinished,
}

/// What a successful move did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Ongoing { check: bool },
    Checkmate { winner: Color },
    Stalemate,
}

/// One game of chess: a board plus its lifecycle. All mutation goes through
/// `apply_move` and `resign`; a Finished game rejects both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    status: GameStatus,
    result: Option<GameResult>,
}

impl Game {
    /// A fresh game: starting position, White to move, Active.
    pub fn new() -> Self {
        Game::from_board(Board::startpos())
    }

    /// An Active game over an arbitrary position. Used by tests and tooling;
    /// the one-king-per-side invariant is the caller's to honor.
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            status: GameStatus::Active,
            result: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Validate and apply one move. Fails with `GameFinished` on a terminal
    /// game and with `IllegalMove` unless a piece of the side to move sits on
    /// `mv.from` and `mv` is a member of that square's legal-move set (the
    /// membership test covers the promotion field, which is what rejects
    /// malformed promotions). On success the move is applied, the turn flips,
    /// and the game finishes itself on checkmate or stalemate.
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome, GameError> {
        if self.status == GameStatus::Finished {
            return Err(GameError::GameFinished);
        }
        let piece = self.board.get(mv.from).ok_or(GameError::IllegalMove)?;
        if piece.color != self.board.side_to_move() {
            return Err(GameError::IllegalMove);
        }
        if !rules::legal_moves(&self.board, mv.from).contains(&mv) {
            return Err(GameError::IllegalMove);
        }

        let mover = piece.color;
        self.board.make_move(mv);

        let next = self.board.side_to_move();
        if !rules::has_any_legal_move(&self.board, next) {
            self.status = GameStatus::Finished;
            if rules::is_in_check(&self.board, next) {
                self.result = Some(GameResult::win_for(mover));
                Ok(MoveOutcome::Checkmate { winner: mover })
            } else {
                self.result = Some(GameResult::Draw);
                Ok(MoveOutcome::Stalemate)
            }
        } else {
            Ok(MoveOutcome::Ongoing {
                check: rules::is_in_check(&self.board, next),
            })
        }
    }

    /// Concede the game for `side`, whoever's turn it is. The opposing side
    /// wins. Only a terminal game refuses.
    pub fn resign(&mut self, side: Color) -> Result<GameResult, GameError> {
        if self.status == GameStatus::Finished {
            return Err(GameError::GameFinished);
        }
        let result = GameResult::win_for(side.other());
        self.status = GameStatus::Finished;
        self.result = Some(result);
        Ok(result)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
