//! Heuristic position evaluation.

use draughts_core::{legal_moves, Board, Player, Rank};

/// Material values; a king is worth roughly three pawns.
pub const PAWN_VALUE: i32 = 100;
pub const KING_VALUE: i32 = 300;

/// Bonus per row a pawn has already advanced toward its promotion row.
const ADVANCE_BONUS: i32 = 4;

/// Bonus per legal move more than the opponent has.
const MOBILITY_WEIGHT: i32 = 2;

/// Static square bonus, highest in the centre. Symmetric, so it reads the same
/// from either side. Light squares are never occupied and stay zero.
#[rustfmt::skip]
const SQUARE_BONUS: [[i32; 8]; 8] = [
    [0, 2, 0, 2, 0, 2, 0, 0],
    [2, 0, 4, 0, 4, 0, 4, 0],
    [0, 4, 0, 8, 0, 8, 0, 2],
    [2, 0, 8, 0, 12, 0, 4, 0],
    [0, 4, 0, 12, 0, 8, 0, 2],
    [2, 0, 8, 0, 8, 0, 4, 0],
    [0, 4, 0, 4, 0, 4, 0, 2],
    [0, 0, 2, 0, 2, 0, 2, 0],
];

/// Evaluates the board from `perspective`'s point of view.
///
/// Sums material, square bonuses, pawn advancement and a mobility term. Positive
/// is good for `perspective`.
pub fn evaluate(board: &Board, perspective: Player) -> i32 {
    let mut score = 0i32;

    for (p, pc) in board.pieces() {
        let mut v = match pc.rank {
            Rank::Pawn => PAWN_VALUE,
            Rank::King => KING_VALUE,
        };
        v += SQUARE_BONUS[p.row as usize][p.col as usize];
        if pc.rank == Rank::Pawn {
            let start_row = pc.owner.other().promotion_row();
            v += ADVANCE_BONUS * i32::from((p.row - start_row).abs());
        }
        score += if pc.owner == perspective { v } else { -v };
    }

    let mine = legal_moves(board, perspective).len() as i32;
    let theirs = legal_moves(board, perspective.other()).len() as i32;
    score += MOBILITY_WEIGHT * (mine - theirs);

    score
}
