//! Room state machine.
//!
//! `Coordinator` handles one inbound event at a time and answers with the
//! messages to deliver. It performs no I/O; the server actor owns delivery.

use draughts_core::{game_outcome, legal_moves, Move, Player};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::SessionError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::room::{ClientId, RoomStatus, Seat};
use crate::store::RoomStore;

const MAX_NAME_LEN: usize = 32;

/// A message the coordinator wants delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Send to one client now
    To {
        client: ClientId,
        message: ServerMessage,
    },
    /// Call [`Coordinator::start_match`] for `room_id` and `round` after `delay`
    StartAfter {
        room_id: String,
        round: u64,
        delay: Duration,
    },
    /// Send to every connected client
    Broadcast { message: ServerMessage },
}

impl Dispatch {
    fn to(client: ClientId, message: ServerMessage) -> Self {
        Dispatch::To { client, message }
    }
}

type Handled = Result<Vec<Dispatch>, SessionError>;

pub struct Coordinator<R = StdRng> {
    store: RoomStore<R>,
    match_start_delay: Duration,
}

impl Coordinator<StdRng> {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_store(RoomStore::new(config.room_code_len), config.match_start_delay())
    }
}

impl<R: Rng> Coordinator<R> {
    pub fn with_store(store: RoomStore<R>, match_start_delay: Duration) -> Self {
        Self {
            store,
            match_start_delay,
        }
    }

    pub fn store(&self) -> &RoomStore<R> {
        &self.store
    }

    /// Handle one client request. Rejections become an error message to `client` only.
    pub fn handle(&mut self, client: ClientId, msg: ClientMessage) -> Vec<Dispatch> {
        let result = match msg {
            ClientMessage::ListRooms => Ok(vec![Dispatch::to(client, self.room_list())]),
            ClientMessage::CreateRoom {
                room_name,
                player_name,
            } => self.create_room(client, &room_name, &player_name),
            ClientMessage::JoinRoom {
                room_id,
                player_name,
            } => self.join_room(client, &room_id, &player_name),
            ClientMessage::SubmitMove { room_id, mv } => self.submit_move(client, &room_id, &mv),
            ClientMessage::LeaveRoom { room_id } => self.leave_room(client, &room_id),
            ClientMessage::RequestRematch { room_id } => self.request_rematch(client, &room_id),
        };

        match result {
            Ok(out) => out,
            Err(err) => {
                warn!(%client, %err, "request rejected");
                vec![Dispatch::to(client, ServerMessage::error(err))]
            }
        }
    }

    /// Tear down every room `client` sat in and tell the opponents.
    pub fn disconnect(&mut self, client: ClientId) -> Vec<Dispatch> {
        let mut out = Vec::new();
        for code in self.store.rooms_of(client) {
            if let Some(room) = self.store.remove(&code) {
                info!(room = %room.id, %client, "room closed by disconnect");
                if let Some(opponent) = room.opponent_of(client) {
                    out.push(Dispatch::to(opponent, ServerMessage::OpponentLeft));
                }
            }
        }
        out.push(self.broadcast_room_list());
        out
    }

    /// Announce the start of `round` in `room_id` to both seats.
    ///
    /// Runs after the join delay. Nothing is sent if the room was closed, reset or
    /// already started in the meantime.
    pub fn start_match(&mut self, room_id: &str, round: u64) -> Vec<Dispatch> {
        let Some(room) = self.store.get_mut(room_id) else {
            debug!(room_id, "start for closed room dropped");
            return Vec::new();
        };
        if room.status != RoomStatus::Playing
            || room.round != round
            || room.started
            || room.guest.is_none()
        {
            debug!(room = %room.id, round, "stale match start dropped");
            return Vec::new();
        }

        room.started = true;
        info!(room = %room.id, round, "match started");
        let start = ServerMessage::MatchStarted {
            board: room.board,
            turn: room.to_move,
        };
        room.participants()
            .map(|seat| Dispatch::to(seat, start.clone()))
            .collect()
    }

    fn room_list(&self) -> ServerMessage {
        ServerMessage::RoomList {
            rooms: self.store.open_rooms(),
        }
    }

    fn broadcast_room_list(&self) -> Dispatch {
        Dispatch::Broadcast {
            message: self.room_list(),
        }
    }

    fn create_room(&mut self, client: ClientId, room_name: &str, player_name: &str) -> Handled {
        let host = Seat {
            id: client,
            name: clean_name(player_name),
        };
        let room = self.store.create(clean_name(room_name), host);
        info!(room = %room.id, %client, "room created");

        let created = ServerMessage::RoomCreated {
            room: room.summary(),
            color: Player::White,
        };
        Ok(vec![Dispatch::to(client, created), self.broadcast_room_list()])
    }

    fn join_room(&mut self, client: ClientId, room_id: &str, player_name: &str) -> Handled {
        let room = self
            .store
            .get_mut(room_id)
            .ok_or_else(|| SessionError::RoomNotFound(room_id.to_string()))?;
        if !room.is_joinable() || room.host.id == client {
            return Err(SessionError::RoomNotJoinable(room.id.clone()));
        }

        let name = clean_name(player_name);
        room.guest = Some(Seat {
            id: client,
            name: name.clone(),
        });
        room.status = RoomStatus::Playing;
        room.reset_game();
        info!(room = %room.id, %client, "guest joined");

        let mut out = vec![
            Dispatch::to(
                client,
                ServerMessage::RoomJoined {
                    room: room.summary(),
                    color: Player::Black,
                },
            ),
            Dispatch::to(room.host.id, ServerMessage::OpponentJoined { player_name: name }),
        ];
        out.push(Dispatch::StartAfter {
            room_id: room.id.clone(),
            round: room.round,
            delay: self.match_start_delay,
        });
        out.push(self.broadcast_room_list());
        Ok(out)
    }

    fn submit_move(&mut self, client: ClientId, room_id: &str, mv: &Move) -> Handled {
        // The room may already be gone after a concurrent disconnect
        let Some(room) = self.store.get_mut(room_id) else {
            debug!(%client, room_id, "move for unknown room ignored");
            return Ok(Vec::new());
        };
        let seat = room
            .seat_of(client)
            .ok_or_else(|| SessionError::NotInRoom(room.id.clone()))?;
        if !room.accepts_moves() {
            return Err(SessionError::NotPlaying(room.id.clone()));
        }
        if seat != room.to_move {
            return Err(SessionError::WrongTurn {
                expected: room.to_move,
                got: seat,
            });
        }
        let legal = legal_moves(&room.board, seat)
            .into_iter()
            .find(|m| m.same_play(mv))
            .ok_or_else(|| SessionError::IllegalMove(mv.clone()))?;

        room.board = room.board.apply(&legal);
        room.captured.add(seat, legal.captures.len() as u32);
        room.to_move = seat.other();
        let outcome = game_outcome(&room.board, room.to_move);
        if outcome.ended {
            room.status = RoomStatus::Ended;
            info!(room = %room.id, winner = ?outcome.winner, "game over");
        }
        debug!(room = %room.id, %client, mv = %legal, "move applied");

        let Some(opponent) = room.opponent_of(client) else {
            return Ok(Vec::new());
        };
        let applied = ServerMessage::MoveApplied {
            mv: legal,
            board: room.board,
            turn: room.to_move,
            captured: room.captured,
            ended: outcome.ended,
            winner: outcome.winner,
        };
        Ok(vec![Dispatch::to(opponent, applied)])
    }

    fn leave_room(&mut self, client: ClientId, room_id: &str) -> Handled {
        let seated = self.store.get(room_id).is_some_and(|r| r.has(client));
        if !seated {
            debug!(%client, room_id, "leave for unknown room ignored");
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        if let Some(room) = self.store.remove(room_id) {
            info!(room = %room.id, %client, "room closed by leave");
            if let Some(opponent) = room.opponent_of(client) {
                out.push(Dispatch::to(opponent, ServerMessage::OpponentLeft));
            }
        }
        out.push(self.broadcast_room_list());
        Ok(out)
    }

    fn request_rematch(&mut self, client: ClientId, room_id: &str) -> Handled {
        let room = self
            .store
            .get_mut(room_id)
            .ok_or_else(|| SessionError::RoomNotFound(room_id.to_string()))?;
        if !room.has(client) {
            return Err(SessionError::NotInRoom(room.id.clone()));
        }
        if room.guest.is_none() {
            return Err(SessionError::OpponentMissing(room.id.clone()));
        }

        room.reset_game();
        room.status = RoomStatus::Playing;
        room.started = true;
        info!(room = %room.id, %client, "rematch started");

        let accepted = ServerMessage::RematchAccepted {
            board: room.board,
            turn: room.to_move,
        };
        Ok(room
            .participants()
            .map(|seat| Dispatch::to(seat, accepted.clone()))
            .collect())
    }
}

fn clean_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    if trimmed.is_empty() {
        "Anonymous".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;
