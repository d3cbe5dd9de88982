//! Draughts sessions
//!
//! Networked rooms with an authoritative board per match, the single-writer
//! server actor that serializes every client event, a background worker for the
//! computer opponent and a driver for local games.

pub mod ai_worker;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod local;
pub mod protocol;
pub mod room;
pub mod server;
pub mod store;

pub use ai_worker::{AiReply, AiRequest, AiWorker};
pub use config::{AiConfig, ServerConfig};
pub use coordinator::{Coordinator, Dispatch};
pub use error::{ConfigError, LocalError, ServerClosed, SessionError, WorkerClosed};
pub use local::{LocalMatch, PlayMode};
pub use protocol::{ClientMessage, ServerMessage};
pub use room::{ClientId, Room, RoomStatus, RoomSummary, Seat};
pub use server::{Command, Outbox, ServerHandle, SessionServer};
pub use store::RoomStore;

// Re-exported so callers need not depend on the engine crate for tiers
pub use classical_engine::Difficulty;
