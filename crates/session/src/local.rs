//! Local play driver: two humans on one machine, or a human against the computer.

use classical_engine::Difficulty;
use draughts_core::{GameState, Move, Outcome, Player};
use tracing::{debug, warn};

use crate::ai_worker::{AiReply, AiRequest, AiWorker};
use crate::error::{LocalError, WorkerClosed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Both sides entered by hand
    PvP,
    /// The computer plays `ai`
    VsComputer { ai: Player, difficulty: Difficulty },
}

/// A local game plus whose moves come from where.
///
/// Every undo, redo or reset advances the epoch, so a computer reply computed for
/// an earlier position is recognised and dropped.
#[derive(Debug, Clone)]
pub struct LocalMatch {
    game: GameState,
    mode: PlayMode,
    epoch: u64,
}

impl LocalMatch {
    pub fn new(mode: PlayMode) -> Self {
        Self::from_game(GameState::new(), mode)
    }

    /// Continue an existing game, e.g. one set up from a custom position.
    pub fn from_game(game: GameState, mode: PlayMode) -> Self {
        Self {
            game,
            mode,
            epoch: 0,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True when the computer owes the next move.
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            PlayMode::VsComputer { ai, .. } => ai == self.game.to_move() && !self.game.outcome().ended,
            PlayMode::PvP => false,
        }
    }

    /// Play a move entered by a human.
    pub fn play(&mut self, mv: &Move) -> Result<Outcome, LocalError> {
        if self.is_ai_turn() {
            return Err(LocalError::ComputerToMove);
        }
        Ok(self.game.play(mv)?)
    }

    /// Undo back to the last position where a human was to move.
    ///
    /// Against the computer that is two entries (its reply and the human move).
    /// When the computer is the side to move, because it is still thinking or
    /// because the human's last move ended the game, one entry is enough.
    pub fn undo(&mut self) -> bool {
        let steps = self.history_step();
        let done = self.game.undo(steps);
        if done {
            self.epoch += 1;
        }
        done
    }

    /// Mirror of [`undo`](Self::undo). A single entry is replayed when the human
    /// move was the last one recorded, e.g. a winning move.
    pub fn redo(&mut self) -> bool {
        let steps = match self.history_step() {
            n if self.game.can_redo(n) => n,
            _ => 1,
        };
        let done = self.game.redo(steps);
        if done {
            self.epoch += 1;
        }
        done
    }

    pub fn reset(&mut self) {
        self.game.reset();
        self.epoch += 1;
    }

    fn history_step(&self) -> usize {
        match self.mode {
            PlayMode::VsComputer { ai, .. } if ai != self.game.to_move() => 2,
            _ => 1,
        }
    }

    /// The search request for the current position, if the computer is to move.
    pub fn ai_request(&self) -> Option<AiRequest> {
        let PlayMode::VsComputer { ai, difficulty } = self.mode else {
            return None;
        };
        self.is_ai_turn().then(|| AiRequest {
            epoch: self.epoch,
            board: *self.game.board(),
            player: ai,
            difficulty,
        })
    }

    /// Apply a computer reply. Replies for another epoch, or arriving when the
    /// computer is not to move, are discarded and yield `None`.
    pub fn accept_ai_reply(&mut self, reply: AiReply) -> Option<Outcome> {
        if reply.epoch != self.epoch || !self.is_ai_turn() {
            debug!(reply = reply.epoch, current = self.epoch, "stale AI reply discarded");
            return None;
        }
        let mv = reply.mv?;
        match self.game.play(&mv) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(%err, "AI reply rejected");
                None
            }
        }
    }

    /// Ask `worker` for the computer's move and apply it.
    ///
    /// Returns `Ok(None)` when it is not the computer's turn.
    pub async fn next_ai_move(&mut self, worker: &mut AiWorker) -> Result<Option<Outcome>, WorkerClosed> {
        let Some(req) = self.ai_request() else {
            return Ok(None);
        };
        worker.request(req)?;
        while let Some(reply) = worker.recv().await {
            if reply.epoch != self.epoch {
                debug!(reply = reply.epoch, "skipping reply for an older position");
                continue;
            }
            return Ok(self.accept_ai_reply(reply));
        }
        Err(WorkerClosed)
    }
}
