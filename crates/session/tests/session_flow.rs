//! Full room lifecycle through the server actor
//!
//! Most tests zero every delay, so messages arrive in dispatch order. The
//! match-start tests keep a short delay to exercise events racing the start.

use draughts_core::{legal_moves, Board, Player};
use session::{ClientId, ClientMessage, ServerConfig, ServerHandle, ServerMessage, SessionServer};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

type Inbox = UnboundedReceiver<ServerMessage>;

async fn recv(inbox: &mut Inbox) -> ServerMessage {
    timeout(Duration::from_secs(2), inbox.recv())
        .await
        .expect("timed out waiting for a message")
        .expect("server closed the outbox")
}

/// Next message that is not a room-directory update.
async fn recv_event(inbox: &mut Inbox) -> ServerMessage {
    loop {
        match recv(inbox).await {
            ServerMessage::RoomList { .. } => continue,
            other => return other,
        }
    }
}

struct Table {
    server: ServerHandle,
    host: ClientId,
    guest: ClientId,
    host_inbox: Inbox,
    guest_inbox: Inbox,
    room_id: String,
}

/// Host creates room "R", guest joins, both see the match start.
async fn seated_table() -> Table {
    let server = SessionServer::spawn(&ServerConfig::instant());
    let (host, guest) = (ClientId::new(), ClientId::new());
    let mut host_inbox = server.connect(host).unwrap();
    let mut guest_inbox = server.connect(guest).unwrap();

    server
        .send(
            host,
            ClientMessage::CreateRoom {
                room_name: "R".into(),
                player_name: "host".into(),
            },
        )
        .unwrap();
    let room_id = match recv_event(&mut host_inbox).await {
        ServerMessage::RoomCreated { room, color } => {
            assert_eq!(color, Player::White);
            assert_eq!(room.name, "R");
            room.id
        }
        other => panic!("expected RoomCreated, got {other:?}"),
    };

    // The guest learns about the room from the directory broadcast
    match recv(&mut guest_inbox).await {
        ServerMessage::RoomList { rooms } => assert_eq!(rooms[0].id, room_id),
        other => panic!("expected RoomList, got {other:?}"),
    }

    server
        .send(
            guest,
            ClientMessage::JoinRoom {
                room_id: room_id.clone(),
                player_name: "guest".into(),
            },
        )
        .unwrap();

    assert!(matches!(
        recv_event(&mut guest_inbox).await,
        ServerMessage::RoomJoined { color: Player::Black, .. }
    ));
    assert!(matches!(
        recv_event(&mut host_inbox).await,
        ServerMessage::OpponentJoined { .. }
    ));

    let start = ServerMessage::MatchStarted {
        board: Board::startpos(),
        turn: Player::White,
    };
    assert_eq!(recv_event(&mut host_inbox).await, start);
    assert_eq!(recv_event(&mut guest_inbox).await, start);

    Table {
        server,
        host,
        guest,
        host_inbox,
        guest_inbox,
        room_id,
    }
}

#[tokio::test]
async fn wrong_turn_is_reported_to_sender_only() {
    let mut t = seated_table().await;

    let black = legal_moves(&Board::startpos(), Player::Black).remove(0);
    t.server
        .send(
            t.guest,
            ClientMessage::SubmitMove {
                room_id: t.room_id.clone(),
                mv: black,
            },
        )
        .unwrap();
    assert!(matches!(
        recv_event(&mut t.guest_inbox).await,
        ServerMessage::Error { .. }
    ));

    // The host is unaffected and can still move
    let white = legal_moves(&Board::startpos(), Player::White).remove(0);
    t.server
        .send(
            t.host,
            ClientMessage::SubmitMove {
                room_id: t.room_id.clone(),
                mv: white.clone(),
            },
        )
        .unwrap();
    match recv_event(&mut t.guest_inbox).await {
        ServerMessage::MoveApplied { mv, board, turn, .. } => {
            assert_eq!(mv, white);
            assert_eq!(board, Board::startpos().apply(&white));
            assert_eq!(turn, Player::Black);
        }
        other => panic!("expected MoveApplied, got {other:?}"),
    }
    while let Ok(msg) = t.host_inbox.try_recv() {
        assert!(matches!(msg, ServerMessage::RoomList { .. }), "host got {msg:?}");
    }
}

#[tokio::test]
async fn disconnect_notifies_opponent_and_closes_room() {
    let mut t = seated_table().await;

    t.server.disconnect(t.host).unwrap();
    assert_eq!(recv_event(&mut t.guest_inbox).await, ServerMessage::OpponentLeft);
    assert_eq!(
        recv(&mut t.guest_inbox).await,
        ServerMessage::RoomList { rooms: Vec::new() }
    );

    // Later requests for the room are silently ignored
    t.server
        .send(
            t.guest,
            ClientMessage::LeaveRoom {
                room_id: t.room_id.clone(),
            },
        )
        .unwrap();
    t.server.send(t.guest, ClientMessage::ListRooms).unwrap();
    assert_eq!(
        recv(&mut t.guest_inbox).await,
        ServerMessage::RoomList { rooms: Vec::new() }
    );
}

#[tokio::test]
async fn rematch_resets_both_sides() {
    let mut t = seated_table().await;

    let white = legal_moves(&Board::startpos(), Player::White).remove(0);
    t.server
        .send(
            t.host,
            ClientMessage::SubmitMove {
                room_id: t.room_id.clone(),
                mv: white,
            },
        )
        .unwrap();
    assert!(matches!(
        recv_event(&mut t.guest_inbox).await,
        ServerMessage::MoveApplied { .. }
    ));

    t.server
        .send(
            t.guest,
            ClientMessage::RequestRematch {
                room_id: t.room_id.clone(),
            },
        )
        .unwrap();
    let accepted = ServerMessage::RematchAccepted {
        board: Board::startpos(),
        turn: Player::White,
    };
    assert_eq!(recv_event(&mut t.host_inbox).await, accepted);
    assert_eq!(recv_event(&mut t.guest_inbox).await, accepted);
}

#[tokio::test]
async fn joining_unknown_room_is_an_error() {
    let server = SessionServer::spawn(&ServerConfig::instant());
    let client = ClientId::new();
    let mut inbox = server.connect(client).unwrap();

    server
        .send(
            client,
            ClientMessage::JoinRoom {
                room_id: "QQQQQ".into(),
                player_name: "late".into(),
            },
        )
        .unwrap();
    match recv(&mut inbox).await {
        ServerMessage::Error { message } => assert!(message.contains("QQQQQ")),
        other => panic!("expected Error, got {other:?}"),
    }
}

// =============================================================================
// Delayed match start
// =============================================================================

const START_DELAY_MS: u64 = 150;

/// Host and guest seated in one room, start still pending.
async fn joined_with_delay() -> Table {
    let config = ServerConfig {
        match_start_delay_ms: START_DELAY_MS,
        ..ServerConfig::instant()
    };
    let server = SessionServer::spawn(&config);
    let (host, guest) = (ClientId::new(), ClientId::new());
    let mut host_inbox = server.connect(host).unwrap();
    let mut guest_inbox = server.connect(guest).unwrap();

    server
        .send(
            host,
            ClientMessage::CreateRoom {
                room_name: "slow".into(),
                player_name: "host".into(),
            },
        )
        .unwrap();
    let room_id = match recv_event(&mut host_inbox).await {
        ServerMessage::RoomCreated { room, .. } => room.id,
        other => panic!("expected RoomCreated, got {other:?}"),
    };
    server
        .send(
            guest,
            ClientMessage::JoinRoom {
                room_id: room_id.clone(),
                player_name: "guest".into(),
            },
        )
        .unwrap();
    assert!(matches!(
        recv_event(&mut host_inbox).await,
        ServerMessage::OpponentJoined { .. }
    ));
    assert!(matches!(
        recv_event(&mut guest_inbox).await,
        ServerMessage::RoomJoined { .. }
    ));

    Table {
        server,
        host,
        guest,
        host_inbox,
        guest_inbox,
        room_id,
    }
}

/// Every non-directory message that arrives within `window`.
async fn events_within(inbox: &mut Inbox, window: Duration) -> Vec<ServerMessage> {
    let mut seen = Vec::new();
    while let Ok(Some(msg)) = timeout(window, inbox.recv()).await {
        if !matches!(msg, ServerMessage::RoomList { .. }) {
            seen.push(msg);
        }
    }
    seen
}

#[tokio::test]
async fn move_before_start_is_rejected_and_start_stays_first() {
    let mut t = joined_with_delay().await;

    let white = legal_moves(&Board::startpos(), Player::White).remove(0);
    t.server
        .send(
            t.host,
            ClientMessage::SubmitMove {
                room_id: t.room_id.clone(),
                mv: white.clone(),
            },
        )
        .unwrap();
    assert!(matches!(
        recv_event(&mut t.host_inbox).await,
        ServerMessage::Error { .. }
    ));

    let start = ServerMessage::MatchStarted {
        board: Board::startpos(),
        turn: Player::White,
    };
    assert_eq!(recv_event(&mut t.guest_inbox).await, start);
    assert_eq!(recv_event(&mut t.host_inbox).await, start);

    // Once started the same move goes through
    t.server
        .send(
            t.host,
            ClientMessage::SubmitMove {
                room_id: t.room_id.clone(),
                mv: white,
            },
        )
        .unwrap();
    assert!(matches!(
        recv_event(&mut t.guest_inbox).await,
        ServerMessage::MoveApplied { .. }
    ));
    let window = Duration::from_millis(3 * START_DELAY_MS);
    assert!(events_within(&mut t.guest_inbox, window).await.is_empty());
}

#[tokio::test]
async fn disconnect_during_start_delay_cancels_start() {
    let mut t = joined_with_delay().await;

    t.server.disconnect(t.host).unwrap();
    let window = Duration::from_millis(3 * START_DELAY_MS);
    assert_eq!(
        events_within(&mut t.guest_inbox, window).await,
        vec![ServerMessage::OpponentLeft]
    );
}
