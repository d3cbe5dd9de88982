//! Minimax search with alpha-beta pruning

use draughts_core::{legal_moves, Board, Move, Player};

use crate::eval::evaluate;

/// Score for a side left without a move. Remaining depth is added on top so
/// quicker wins and slower losses rank higher.
pub const WIN_SCORE: i32 = 100_000;

const INF: i32 = i32::MAX / 2;

/// Searches `board` for `me` and returns the best move with its score.
///
/// # Arguments
/// * `board` - The position to search
/// * `me` - The side to move, and the side scores are computed for
/// * `depth` - Search depth in plies
/// * `nodes` - Counter for nodes searched (for statistics)
///
/// # Returns
/// `None` if `me` has no legal move. Ties keep the first move generated.
pub fn pick_best_move(board: &Board, me: Player, depth: u8, nodes: &mut u64) -> Option<(Move, i32)> {
    let moves = legal_moves(board, me);
    if moves.is_empty() {
        return None;
    }

    let mut alpha = -INF;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        let next = board.apply(&mv);
        *nodes += 1;
        let score = minimax(&next, me.other(), depth.saturating_sub(1), alpha, INF, me, nodes);

        if best.as_ref().map_or(true, |(_, s)| score > *s) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
    }
    best
}

/// Recursive minimax with alpha-beta pruning. `to_move` maximises when it is `me`.
pub(crate) fn minimax(
    board: &Board,
    to_move: Player,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    me: Player,
    nodes: &mut u64,
) -> i32 {
    let moves = legal_moves(board, to_move);

    if moves.is_empty() {
        return terminal_score(to_move, me, depth);
    }
    if depth == 0 {
        return evaluate(board, me);
    }

    if to_move == me {
        let mut best = -INF;
        for mv in &moves {
            let next = board.apply(mv);
            *nodes += 1;
            let score = minimax(&next, to_move.other(), depth - 1, alpha, beta, me, nodes);
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break; // Beta cutoff
            }
        }
        best
    } else {
        let mut best = INF;
        for mv in &moves {
            let next = board.apply(mv);
            *nodes += 1;
            let score = minimax(&next, to_move.other(), depth - 1, alpha, beta, me, nodes);
            best = best.min(score);
            beta = beta.min(best);
            if alpha >= beta {
                break; // Alpha cutoff
            }
        }
        best
    }
}

/// Score of a node where `to_move` has nothing to play.
pub(crate) fn terminal_score(to_move: Player, me: Player, depth: u8) -> i32 {
    let magnitude = WIN_SCORE + i32::from(depth);
    if to_move == me { -magnitude } else { magnitude }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
