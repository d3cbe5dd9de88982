//! Classical Draughts Engine
//!
//! Minimax with alpha-beta pruning over the rules in `draughts_core`, scored by a
//! handcrafted evaluation. Strength is set by a difficulty tier that fixes the
//! search depth; the easiest tier also blunders on purpose.

mod eval;
mod search;

use draughts_core::{legal_moves, Board, Move, Player};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};


/// Chance that the easy tier ignores the search and plays a random move.
pub const EASY_BLUNDER_CHANCE: f64 = 0.3;

/// How many of the first generated moves a blunder picks from.
pub const EASY_BLUNDER_POOL: usize = 3;

/// Difficulty tiers, each with a fixed search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Search depth in plies.
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Draughts engine using minimax with alpha-beta pruning.
///
/// The random source is a type parameter so tests can pass a seeded or mock
/// generator and get reproducible easy-tier play.
#[derive(Debug, Clone)]
pub struct ClassicalEngine<R = StdRng> {
    rng: R,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ClassicalEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ClassicalEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, nodes: 0 }
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Pick a move for `player` at the given difficulty.
    ///
    /// Returns `None` only when `player` has no legal move (including having no
    /// pieces left).
    pub fn best_move(&mut self, board: &Board, player: Player, difficulty: Difficulty) -> Option<Move> {
        self.nodes = 0;
        if board.count(player) == 0 {
            return None;
        }

        if difficulty == Difficulty::Easy && self.rng.gen_bool(EASY_BLUNDER_CHANCE) {
            let mut moves = legal_moves(board, player);
            if moves.is_empty() {
                return None;
            }
            let pool = moves.len().min(EASY_BLUNDER_POOL);
            let pick = self.rng.gen_range(0..pool);
            return Some(moves.swap_remove(pick));
        }

        search::pick_best_move(board, player, difficulty.depth(), &mut self.nodes).map(|(mv, _)| mv)
    }
}

// Re-export for direct use if needed
pub use eval::evaluate;
pub use search::{pick_best_move, WIN_SCORE};
