//! Background computer opponent.
//!
//! Searches are CPU-bound, so the worker runs each one on tokio's blocking pool
//! and hands the result back over a channel. Requests carry an epoch that is
//! echoed in the reply; the caller uses it to drop answers for positions that
//! were undone or reset in the meantime.

use classical_engine::{ClassicalEngine, Difficulty};
use draughts_core::{Board, Move, Player};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::error::WorkerClosed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiRequest {
    pub epoch: u64,
    pub board: Board,
    pub player: Player,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiReply {
    pub epoch: u64,
    /// `None` when the side had no move
    pub mv: Option<Move>,
}

/// Handle to a running worker task. Dropping it stops the task.
#[derive(Debug)]
pub struct AiWorker {
    requests: mpsc::UnboundedSender<AiRequest>,
    replies: mpsc::UnboundedReceiver<AiReply>,
}

impl AiWorker {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn(config: &AiConfig) -> Self {
        let engine = match config.seed {
            Some(seed) => ClassicalEngine::seeded(seed),
            None => ClassicalEngine::new(),
        };
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(engine, config.think_delay(), req_rx, reply_tx));

        Self {
            requests: req_tx,
            replies: reply_rx,
        }
    }

    pub fn request(&self, req: AiRequest) -> Result<(), WorkerClosed> {
        debug!(epoch = req.epoch, player = %req.player, difficulty = %req.difficulty, "AI move requested");
        self.requests.send(req).map_err(|_| WorkerClosed)
    }

    /// Next reply, or `None` once the worker has stopped.
    pub async fn recv(&mut self) -> Option<AiReply> {
        self.replies.recv().await
    }
}

async fn run(
    mut engine: ClassicalEngine,
    think_delay: Duration,
    mut requests: mpsc::UnboundedReceiver<AiRequest>,
    replies: mpsc::UnboundedSender<AiReply>,
) {
    while let Some(req) = requests.recv().await {
        if !think_delay.is_zero() {
            tokio::time::sleep(think_delay).await;
        }

        let AiRequest {
            epoch,
            board,
            player,
            difficulty,
        } = req;
        let search = tokio::task::spawn_blocking(move || {
            let mv = engine.best_move(&board, player, difficulty);
            (engine, mv)
        })
        .await;

        let mv = match search {
            Ok((returned, mv)) => {
                engine = returned;
                mv
            }
            Err(err) => {
                warn!(%err, "AI search task failed");
                break;
            }
        };
        debug!(epoch, nodes = engine.nodes(), "AI move ready");

        if replies.send(AiReply { epoch, mv }).is_err() {
            break;
        }
    }
    debug!("AI worker stopped");
}
