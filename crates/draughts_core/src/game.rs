//! Local game state with undo/redo history

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    board::Board,
    movegen::legal_moves,
    outcome::{Outcome, game_outcome},
    types::{Move, Player},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("illegal move {0}")]
    IllegalMove(Move),
    #[error("the game is already over")]
    GameOver,
}

/// Pieces each side has captured so far, indexed by `Player::idx()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureCounts {
    pub white: u32,
    pub black: u32,
}

impl CaptureCounts {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    pub fn add(&mut self, player: Player, n: u32) {
        match player {
            Player::White => self.white += n,
            Player::Black => self.black += n,
        }
    }
}

/// One entry of the game history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub to_move: Player,
    pub captured: CaptureCounts,
    pub last_move: Option<Move>,
}

impl Snapshot {
    fn initial() -> Self {
        Self {
            board: Board::startpos(),
            to_move: Player::White,
            captured: CaptureCounts::default(),
            last_move: None,
        }
    }
}

/// Game record for local play.
///
/// History is append-only; playing a move while positioned in the past drops the
/// undone entries. Computer and human moves share the same sequence.
#[derive(Clone, Debug)]
pub struct GameState {
    history: Vec<Snapshot>,
    cursor: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            history: vec![Snapshot::initial()],
            cursor: 0,
        }
    }

    /// Start the game from an arbitrary position.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        Self {
            history: vec![Snapshot {
                board,
                to_move,
                ..Snapshot::initial()
            }],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Snapshot {
        &self.history[self.cursor]
    }

    pub fn board(&self) -> &Board {
        &self.current().board
    }

    pub fn to_move(&self) -> Player {
        self.current().to_move
    }

    pub fn captured(&self) -> CaptureCounts {
        self.current().captured
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.current().last_move.as_ref()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self.board(), self.to_move())
    }

    pub fn outcome(&self) -> Outcome {
        game_outcome(self.board(), self.to_move())
    }

    /// Number of moves played up to the current position.
    pub fn ply(&self) -> usize {
        self.cursor
    }

    /// Validate `mv` against the generator and play it.
    ///
    /// The move is matched by origin, destination and captured squares; the stored
    /// move is the generator's own, so a stale promotion flag from the caller is
    /// ignored.
    pub fn play(&mut self, mv: &Move) -> Result<Outcome, RulesError> {
        if self.outcome().ended {
            return Err(RulesError::GameOver);
        }
        let legal = self
            .legal_moves()
            .into_iter()
            .find(|m| m.same_play(mv))
            .ok_or_else(|| RulesError::IllegalMove(mv.clone()))?;

        let cur = self.current();
        let mover = cur.to_move;
        let mut captured = cur.captured;
        captured.add(mover, legal.captures.len() as u32);
        let next = Snapshot {
            board: cur.board.apply(&legal),
            to_move: mover.other(),
            captured,
            last_move: Some(legal),
        };

        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        self.cursor += 1;
        Ok(self.outcome())
    }

    pub fn can_undo(&self, steps: usize) -> bool {
        steps > 0 && self.cursor >= steps
    }

    pub fn can_redo(&self, steps: usize) -> bool {
        steps > 0 && self.cursor + steps < self.history.len()
    }

    /// Step back `steps` entries. Returns false (and changes nothing) if history is too short.
    pub fn undo(&mut self, steps: usize) -> bool {
        if !self.can_undo(steps) {
            return false;
        }
        self.cursor -= steps;
        true
    }

    pub fn redo(&mut self, steps: usize) -> bool {
        if !self.can_redo(steps) {
            return false;
        }
        self.cursor += steps;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
