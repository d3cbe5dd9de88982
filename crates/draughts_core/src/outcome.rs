//! Terminal-state detection.
//!
//! Draughts has no stalemate draw: a side that cannot move loses. No draw
//! condition is modelled at all.

use serde::{Deserialize, Serialize};

use crate::{board::Board, movegen::legal_moves, types::Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub ended: bool,
    pub winner: Option<Player>,
}

impl Outcome {
    pub const ONGOING: Outcome = Outcome {
        ended: false,
        winner: None,
    };

    pub fn won_by(player: Player) -> Self {
        Self {
            ended: true,
            winner: Some(player),
        }
    }
}

/// Decides whether the game is over with `side_to_move` to play.
pub fn game_outcome(board: &Board, side_to_move: Player) -> Outcome {
    if board.count(side_to_move) == 0 {
        return Outcome::won_by(side_to_move.other());
    }
    if board.count(side_to_move.other()) == 0 {
        return Outcome::won_by(side_to_move);
    }
    if legal_moves(board, side_to_move).is_empty() {
        return Outcome::won_by(side_to_move.other());
    }
    Outcome::ONGOING
}
