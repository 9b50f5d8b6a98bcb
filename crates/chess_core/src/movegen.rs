use crate::{board::Board, types::*};

/// All pseudo-legal moves for the piece on `from`: every square its movement
/// rule reaches, ignoring whether the mover's own king ends up attacked.
/// An empty `from` square yields no moves.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    pseudo_legal_moves_into(board, from, &mut out);
    out
}

/// Append the pseudo-legal moves for `from` to `out`, reusing the buffer.
pub fn pseudo_legal_moves_into(board: &Board, from: Square, out: &mut Vec<Move>) {
    let Some(pc) = board.get(from) else {
        return;
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, out),
        PieceKind::Knight => gen_knight(board, from, pc.color, out),
        PieceKind::Bishop => gen_slider(
            board,
            from,
            pc.color,
            out,
            &[(1, 1), (1, -1), (-1, 1), (-1, -1)],
        ),
        PieceKind::Rook => {
            gen_slider(board, from, pc.color, out, &[(1, 0), (-1, 0), (0, 1), (0, -1)])
        }
        PieceKind::Queen => gen_slider(
            board,
            from,
            pc.color,
            out,
            &[
                (1, 1),
                (1, -1),
                (-1, 1),
                (-1, -1),
                (1, 0),
                (-1, 0),
                (0, 1),
                (0, -1),
            ],
        ),
        PieceKind::King => gen_king(board, from, pc.color, out),
    }
}

fn gen_pawn(board: &Board, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir: i8 = match c {
        Color::White => 1,
        Color::Black => -1,
    };
    let start_row: u8 = match c {
        Color::White => 2,
        Color::Black => 7,
    };
    let promo_row: u8 = match c {
        Color::White => 8,
        Color::Black => 1,
    };

    // forward 1
    if let Some(to) = from.offset(dir, 0)
        && board.get(to).is_none()
    {
        push_pawn_move(from, to, promo_row, out);

        // forward 2 from the starting rank, both squares empty
        if from.row() == start_row
            && let Some(to2) = to.offset(dir, 0)
            && board.get(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    // diagonal captures, only onto enemy-occupied squares
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc)
            && let Some(tpc) = board.get(to)
            && tpc.color != c
        {
            push_pawn_move(from, to, promo_row, out);
        }
    }
}

/// A pawn arriving on the far rank fans out into the four promotion moves;
/// anywhere else it is a single plain move.
fn push_pawn_move(from: Square, to: Square, promo_row: u8, out: &mut Vec<Move>) {
    if to.row() == promo_row {
        for pk in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            out.push(Move::promoting(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_knight(board: &Board, from: Square, c: Color, out: &mut Vec<Move>) {
    let deltas = [
        (1, 2),
        (2, 1),
        (-1, 2),
        (-2, 1),
        (1, -2),
        (2, -1),
        (-1, -2),
        (-2, -1),
    ];
    for (dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            match board.get(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Square, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    for &(dr, dc) in dirs {
        let mut cursor = from.offset(dr, dc);
        while let Some(to) = cursor {
            match board.get(to) {
                None => {
                    out.push(Move::new(from, to));
                    cursor = to.offset(dr, dc);
                }
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
        }
    }
}

fn gen_king(board: &Board, from: Square, c: Color, out: &mut Vec<Move>) {
    let deltas = [
        (1, 1),
        (1, 0),
        (1, -1),
        (0, 1),
        (0, -1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
    ];
    for (dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            match board.get(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
