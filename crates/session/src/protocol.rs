//! Wire messages between clients and the session server.
//!
//! Both directions are adjacently tagged JSON: `{"event": "...", "data": {...}}`.
//! Boards and moves use the `draughts_core` shapes unchanged.

use draughts_core::{Board, CaptureCounts, Move, Player};
use serde::{Deserialize, Serialize};

use crate::room::RoomSummary;

/// Client → server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    ListRooms,
    CreateRoom {
        room_name: String,
        player_name: String,
    },
    JoinRoom {
        room_id: String,
        player_name: String,
    },
    SubmitMove {
        room_id: String,
        #[serde(rename = "move")]
        mv: Move,
    },
    LeaveRoom {
        room_id: String,
    },
    RequestRematch {
        room_id: String,
    },
}

/// Server → client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    RoomList {
        rooms: Vec<RoomSummary>,
    },
    RoomCreated {
        room: RoomSummary,
        color: Player,
    },
    RoomJoined {
        room: RoomSummary,
        color: Player,
    },
    OpponentJoined {
        player_name: String,
    },
    MatchStarted {
        board: Board,
        turn: Player,
    },
    MoveApplied {
        #[serde(rename = "move")]
        mv: Move,
        board: Board,
        turn: Player,
        captured: CaptureCounts,
        ended: bool,
        winner: Option<Player>,
    },
    OpponentLeft,
    RematchAccepted {
        board: Board,
        turn: Player,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn error(err: impl std::fmt::Display) -> Self {
        ServerMessage::Error {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draughts_core::Position;

    #[test]
    fn submit_move_wire_shape() {
        let msg = ClientMessage::SubmitMove {
            room_id: "ABCDE".to_string(),
            mv: Move::step(Position::new(2, 1), Position::new(3, 2)),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["event"], "submit_move");
        assert_eq!(json["data"]["room_id"], "ABCDE");
        assert_eq!(json["data"]["move"]["from"]["row"], 2);
        assert_eq!(json["data"]["move"]["captures"], serde_json::json!([]));

        let back: ClientMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn unit_events_parse_without_data() {
        let msg: ClientMessage = serde_json::from_str(r#"{"event":"list_rooms"}"#).unwrap();
        assert_eq!(msg, ClientMessage::ListRooms);

        let json = serde_json::to_string(&ServerMessage::OpponentLeft).unwrap();
        assert_eq!(json, r#"{"event":"opponent_left"}"#);
    }

    #[test]
    fn move_without_optional_fields_parses() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"event":"submit_move","data":{"room_id":"x","move":{"from":{"row":2,"col":1},"to":{"row":3,"col":0}}}}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::SubmitMove { mv, .. } => {
                assert!(mv.captures.is_empty());
                assert!(!mv.promotion);
            }
            other => panic!("wrong message: {other:?}"),
        }
    }
}
