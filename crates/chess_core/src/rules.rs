use crate::{board::Board, movegen, types::*};

/// True if a piece of color `by` attacks `target`. Scans outward from the
/// target square: pawn capture squares, knight jumps, king adjacency, then
/// the sliding rays.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    // Pawn attacks: a white pawn attacks from the row below, black from above
    let pawn_dirs: &[(i8, i8)] = match by {
        Color::White => &[(-1, -1), (-1, 1)],
        Color::Black => &[(1, -1), (1, 1)],
    };
    for &(dr, dc) in pawn_dirs {
        if let Some(s) = target.offset(dr, dc)
            && let Some(pc) = board.get(s)
            && pc.color == by
            && pc.kind == PieceKind::Pawn
        {
            return true;
        }
    }

    // Knight attacks
    let knight = [
        (1, 2),
        (2, 1),
        (-1, 2),
        (-2, 1),
        (1, -2),
        (2, -1),
        (-1, -2),
        (-2, -1),
    ];
    for (dr, dc) in knight {
        if let Some(s) = target.offset(dr, dc)
            && let Some(pc) = board.get(s)
            && pc.color == by
            && pc.kind == PieceKind::Knight
        {
            return true;
        }
    }

    // King adjacency
    let king = [
        (1, 1),
        (1, 0),
        (1, -1),
        (0, 1),
        (0, -1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
    ];
    for (dr, dc) in king {
        if let Some(s) = target.offset(dr, dc)
            && let Some(pc) = board.get(s)
            && pc.color == by
            && pc.kind == PieceKind::King
        {
            return true;
        }
    }

    // Sliding: bishop/rook/queen
    let diag = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
    let ortho = [(1, 0), (-1, 0), (0, 1), (0, -1)];

    for (dr, dc) in diag {
        let mut cursor = target.offset(dr, dc);
        while let Some(s) = cursor {
            if let Some(pc) = board.get(s) {
                if pc.color == by && (pc.kind == PieceKind::Bishop || pc.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            cursor = s.offset(dr, dc);
        }
    }
    for (dr, dc) in ortho {
        let mut cursor = target.offset(dr, dc);
        while let Some(s) = cursor {
            if let Some(pc) = board.get(s) {
                if pc.color == by && (pc.kind == PieceKind::Rook || pc.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            cursor = s.offset(dr, dc);
        }
    }

    false
}

/// True if `side`'s king stands attacked. A board without that king is not
/// in check; test positions may omit kings.
pub fn is_in_check(board: &Board, side: Color) -> bool {
    let ksq = match board.king_square(side) {
        Some(s) => s,
        None => return false,
    };
    is_square_attacked(board, ksq, side.other())
}

/// The legal moves for the piece on `from`, returned as a freshly allocated
/// vector. Order is unspecified; treat the result as a set.
pub fn legal_moves(board: &Board, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    legal_moves_into(board, from, &mut out);
    out
}

/// Append the legal moves for `from` to `out`: the pseudo-legal set minus
/// every candidate whose trial application leaves the mover's own king
/// attacked. Each candidate is played on a clone, so `board` is untouched.
pub fn legal_moves_into(board: &Board, from: Square, out: &mut Vec<Move>) {
    let Some(pc) = board.get(from) else {
        return;
    };
    let first = out.len();
    movegen::pseudo_legal_moves_into(board, from, out);

    let mover = pc.color;
    let mut i = first;
    while i < out.len() {
        let mut trial = board.clone();
        trial.make_move(out[i]);
        if is_in_check(&trial, mover) {
            // swap_remove refills slot i with a not-yet-examined candidate
            out.swap_remove(i);
        } else {
            i += 1;
        }
    }
}

/// Union of `legal_moves` over every square holding a piece of `side`.
pub fn all_legal_moves(board: &Board, side: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for sq in Square::all() {
        if let Some(pc) = board.get(sq)
            && pc.color == side
        {
            legal_moves_into(board, sq, &mut out);
        }
    }
    out
}

/// Early-exit form of "does `side` have any legal move at all".
pub fn has_any_legal_move(board: &Board, side: Color) -> bool {
    let mut buf = Vec::with_capacity(32);
    for sq in Square::all() {
        if let Some(pc) = board.get(sq)
            && pc.color == side
        {
            buf.clear();
            legal_moves_into(board, sq, &mut buf);
            if !buf.is_empty() {
                return true;
            }
        }
    }
    false
}

/// In check with no legal move anywhere.
pub fn is_in_checkmate(board: &Board, side: Color) -> bool {
    is_in_check(board, side) && !has_any_legal_move(board, side)
}

/// No legal move anywhere, but not in check.
pub fn is_in_stalemate(board: &Board, side: Color) -> bool {
    !is_in_check(board, side) && !has_any_legal_move(board, side)
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
