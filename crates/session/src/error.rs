//! Error types for rooms, the server actor and local play.

use draughts_core::{Move, Player, RulesError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("room {0} does not exist")]
    RoomNotFound(String),

    #[error("room {0} cannot be joined")]
    RoomNotJoinable(String),

    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Player, got: Player },

    #[error("you are not seated in room {0}")]
    NotInRoom(String),

    #[error("the game in room {0} is not in progress")]
    NotPlaying(String),

    #[error("illegal move {0}")]
    IllegalMove(Move),

    #[error("your opponent has left room {0}")]
    OpponentMissing(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The server actor has stopped and can no longer accept commands.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("session server has shut down")]
pub struct ServerClosed;

/// The AI worker task has stopped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("AI worker has stopped")]
pub struct WorkerClosed;

/// Rejections from the local match driver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocalError {
    #[error("the computer is to move")]
    ComputerToMove,

    #[error(transparent)]
    Rules(#[from] RulesError),
}
