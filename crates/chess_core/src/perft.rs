use crate::{board::Board, rules};

/// Pure perft node count: the number of legal move sequences of length
/// `depth` from this position. Used to validate the move generator against
/// known values.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = rules::all_legal_moves(board, board.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in moves {
        let mut next = board.clone();
        next.make_move(mv);
        nodes += perft(&next, depth - 1);
    }
    nodes
}
