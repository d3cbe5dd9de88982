//! Room records: one per live or pending networked match.

use draughts_core::{Board, CaptureCounts, Player};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Characters used in room codes. Look-alikes (0/O, 1/I) are left out so codes
/// are easy to read out and type.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Identity of a connected client, assigned by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Ended,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub id: ClientId,
    pub name: String,
}

/// Directory entry advertised to clients browsing for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub host_id: ClientId,
    pub host_name: String,
    pub status: RoomStatus,
}

/// Authoritative state of one match. The host always plays white.
#[derive(Clone, Debug)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub host: Seat,
    pub guest: Option<Seat>,
    pub status: RoomStatus,
    pub board: Board,
    pub to_move: Player,
    pub captured: CaptureCounts,
    /// Bumped on every reset, so a delayed start for an earlier game is recognisable
    pub round: u64,
    /// Whether the start of the current round has been announced
    pub started: bool,
}

impl Room {
    pub fn new(id: String, name: String, host: Seat) -> Self {
        Self {
            id,
            name,
            host,
            guest: None,
            status: RoomStatus::Waiting,
            board: Board::startpos(),
            to_move: Player::White,
            captured: CaptureCounts::default(),
            round: 0,
            started: false,
        }
    }

    /// The colour `client` plays in this room, if seated.
    pub fn seat_of(&self, client: ClientId) -> Option<Player> {
        if self.host.id == client {
            Some(Player::White)
        } else if self.guest.as_ref().is_some_and(|g| g.id == client) {
            Some(Player::Black)
        } else {
            None
        }
    }

    pub fn has(&self, client: ClientId) -> bool {
        self.seat_of(client).is_some()
    }

    /// The other participant, if any.
    pub fn opponent_of(&self, client: ClientId) -> Option<ClientId> {
        match self.seat_of(client)? {
            Player::White => self.guest.as_ref().map(|g| g.id),
            Player::Black => Some(self.host.id),
        }
    }

    pub fn participants(&self) -> impl Iterator<Item = ClientId> + '_ {
        std::iter::once(self.host.id).chain(self.guest.as_ref().map(|g| g.id))
    }

    pub fn is_joinable(&self) -> bool {
        self.status == RoomStatus::Waiting && self.guest.is_none()
    }

    /// Fresh board, white to move, counts zeroed. The new round is not started yet.
    pub fn reset_game(&mut self) {
        self.board = Board::startpos();
        self.to_move = Player::White;
        self.captured = CaptureCounts::default();
        self.round += 1;
        self.started = false;
    }

    /// True once a move may be submitted.
    pub fn accepts_moves(&self) -> bool {
        self.status == RoomStatus::Playing && self.started
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            host_id: self.host.id,
            host_name: self.host.name.clone(),
            status: self.status,
        }
    }
}

/// Random room code of `len` characters.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Codes are case-insensitive; the canonical form is upper case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
