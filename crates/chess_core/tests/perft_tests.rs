use std::time::Instant;

use rayon::prelude::*;

use chess_core::{Board, perft};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
// High enough that the depth-4 startpos count runs by default; anything
// costlier waits for FULL_PERFT=1.
const NODE_LIMIT: u64 = 250_000;

// Expected node counts. The generator plays neither castling nor en passant,
// so every case uses depths where those moves cannot occur; the startpos
// values through depth 4 are the standard published ones.
const CASES: &[(&str, &[(u8, u64)])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8_902), (4, 197_281)],
    ),
    // bare kings in opposition: 5 first moves, 36 two-ply sequences
    (
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",
        &[(1, 5), (2, 36)],
    ),
    // stalemated side to move: zero sequences at every depth
    (
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        &[(1, 0), (2, 0)],
    ),
    // same position from the other side
    (
        "k7/2K5/1Q6/8/8/8/8/8 w - - 0 1",
        &[(1, 26)],
    ),
];

#[test]
fn perft_known_positions() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    CASES.par_iter().enumerate().for_each(|(idx, (fen, depths))| {
        let mut ran_depths = Vec::new();
        let mut total_nodes: u64 = 0;
        let case_start = Instant::now();

        for (depth, expected) in depths.iter() {
            if !full && *expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {} for case {} (expected {} nodes), set {}=1 to run all.",
                    depth,
                    idx + 1,
                    expected,
                    FULL_PERFT_ENV
                );
                continue;
            }
            let board = Board::from_fen(fen);
            let got = perft(&board, *depth);
            assert!(
                got == *expected,
                "Perft mismatch for FEN '{}' at depth {}: expected {}, got {}",
                fen,
                depth,
                expected,
                got
            );

            ran_depths.push(*depth);
            total_nodes += got;
        }

        let case_elapsed = case_start.elapsed();
        if !ran_depths.is_empty() {
            println!(
                "Case {:03} done: depths {:?}, total nodes {}, elapsed {:.3?}",
                idx + 1,
                ran_depths,
                total_nodes,
                case_elapsed,
            );
        }
    });
}

#[test]
fn perft_depth_zero_is_one() {
    let board = Board::startpos();
    assert_eq!(perft(&board, 0), 1);
}
