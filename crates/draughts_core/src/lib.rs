pub mod board;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod outcome;
pub mod perft;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use game::*;
pub use movegen::*;
pub use notation::*;
pub use outcome::*;
pub use perft::perft;
pub use types::*;
