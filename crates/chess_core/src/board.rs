use serde::{Deserialize, Serialize};

use crate::types::*;

/// Pure board state: which piece sits on which square, and whose turn it is.
/// No rule knowledge lives here; legality is decided in `rules`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard", into = "RawBoard")]
pub struct Board {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
}

impl Board {
    pub fn startpos() -> Self {
        let mut b = Board {
            squares: [None; 64],
            side_to_move: Color::White,
        };

        // Pawns
        for f in 0..8 {
            b.squares[8 + f] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
            b.squares[48 + f] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            b.squares[f] = Some(Piece {
                color: Color::White,
                kind,
            });
            b.squares[56 + f] = Some(Piece {
                color: Color::Black,
                kind,
            });
        }
        b
    }

    pub fn reset_to_start(&mut self) {
        *self = Board::startpos();
    }

    /// Forsyth-Edwards Notation parser used by tests. Only the piece
    /// placement and side-to-move fields matter here; castling, en-passant
    /// and clock fields are accepted and ignored. Panics on malformed input.
    pub fn from_fen(fen: &str) -> Self {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        assert!(
            parts.len() >= 2,
            "Invalid FEN: expected piece placement and side to move"
        );

        let mut squares = [None; 64];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        assert!(ranks.len() == 8, "Invalid FEN board section");

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let row = 8 - rank_idx as u8; // FEN lists rank 8 .. 1
            let mut col: u8 = 1;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as u8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => panic!("Invalid piece char in FEN: {}", ch),
                    };
                    let sq = Square::new(row, col).expect("Square out of bounds while parsing FEN");
                    squares[sq.index()] = Some(Piece { color, kind });
                    col += 1;
                }
                assert!(col <= 9, "Too many files in FEN rank");
            }
            assert!(col == 9, "Not enough files in FEN rank");
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => panic!("Invalid side to move in FEN: {}", parts[1]),
        };

        Board {
            squares,
            side_to_move,
        }
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn set(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.index()] = pc;
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        for sq in Square::all() {
            if let Some(pc) = self.get(sq)
                && pc.color == color
                && pc.kind == PieceKind::King
            {
                return Some(sq);
            }
        }
        None
    }

    /// Mechanically apply a move: lift the piece, overwrite the destination
    /// (captures are implicit), substitute the promotion kind if one is set,
    /// flip the side to move. No legality checking of any kind.
    pub fn make_move(&mut self, mv: Move) {
        let mut piece = self.get(mv.from).expect("no piece on from-square");
        if let Some(kind) = mv.promotion {
            piece.kind = kind;
        }
        self.set(mv.from, None);
        self.set(mv.to, Some(piece));
        self.side_to_move = self.side_to_move.other();
    }
}

#[derive(Serialize, Deserialize)]
struct RawBoard {
    squares: Vec<Option<Piece>>,
    side_to_move: Color,
}

impl TryFrom<RawBoard> for Board {
    type Error = String;

    fn try_from(raw: RawBoard) -> Result<Board, String> {
        let len = raw.squares.len();
        let squares: [Option<Piece>; 64] = raw
            .squares
            .try_into()
            .map_err(|_| format!("board must have 64 squares, got {len}"))?;
        Ok(Board {
            squares,
            side_to_move: raw.side_to_move,
        })
    }
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> RawBoard {
        RawBoard {
            squares: board.squares.to_vec(),
            side_to_move: board.side_to_move,
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
