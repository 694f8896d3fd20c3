//! End-to-end tests: a server on an ephemeral port, driven by real
//! WebSocket clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use royale_server::{
    domain::{AuthPolicy, Username},
    infrastructure::{
        backplane::InProcessBackplane, identity::StaticTokenIdentity, registry::GroupRegistry,
        store::InMemoryStore,
    },
    ui::Server,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, RelayMemeUseCase, RelayVoteUseCase,
        SendChatUseCase, StartCountdownUseCase,
    },
};
use royale_shared::time::SystemClock;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Wire up a full server on an ephemeral port and serve it in the
/// background, the way the binary does, with one known credential.
async fn spawn_server(auth_policy: AuthPolicy) -> SocketAddr {
    let registry = Arc::new(GroupRegistry::new(Arc::new(InProcessBackplane::new())));
    let store = Arc::new(InMemoryStore::new());
    let identity_provider = Arc::new(
        StaticTokenIdentity::new()
            .with_token("alice-token", Username::new("alice".to_string()).unwrap()),
    );

    let server = Server::new(
        Arc::new(ConnectSessionUseCase::new(
            registry.clone(),
            identity_provider,
            auth_policy,
        )),
        Arc::new(DisconnectSessionUseCase::new(registry.clone())),
        Arc::new(SendChatUseCase::new(registry.clone(), Arc::new(SystemClock))),
        Arc::new(StartCountdownUseCase::new(registry.clone(), store.clone())),
        Arc::new(RelayVoteUseCase::new(registry.clone())),
        Arc::new(RelayMemeUseCase::new(registry)),
        store,
    );
    let app = server.router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr, path: &str) -> WsClient {
    let url = format!("ws://{}{}", addr, path);
    let (client, _response) = connect_async(&url).await.expect("connection failed");
    client
}

async fn send_json(client: &mut WsClient, value: Value) {
    client
        .send(Message::Text(value.to_string().into()))
        .await
        .expect("send failed");
}

async fn recv_json(client: &mut WsClient) -> Value {
    loop {
        let msg = timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("websocket error");
        if msg.is_text() {
            let text = msg.into_text().unwrap();
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn assert_no_frame(client: &mut WsClient) {
    let result = timeout(Duration::from_millis(300), client.next()).await;
    assert!(result.is_err(), "expected silence, got {:?}", result);
}

#[tokio::test]
async fn test_presence_and_chat_round_trip() {
    // Test: joins are announced to everyone, and a chat message echoes back
    // to the sender as well as the other members
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut alice = connect(addr, "/room/lobby?token=alice-token").await;

    // alice sees her own join
    let frame = recv_json(&mut alice).await;
    assert_eq!(frame, json!({"type": "user_join", "username": "alice"}));

    let mut bob = connect(addr, "/room/lobby").await;

    // both see bob join (as Anonymous: no token presented)
    for client in [&mut alice, &mut bob] {
        let frame = recv_json(client).await;
        assert_eq!(frame, json!({"type": "user_join", "username": "Anonymous"}));
    }

    // when:
    send_json(&mut alice, json!({"message": "gg"})).await;

    // then:
    for client in [&mut alice, &mut bob] {
        let frame = recv_json(client).await;
        assert_eq!(frame["type"], "chat_message");
        assert_eq!(frame["message"], "gg");
        assert_eq!(frame["username"], "alice");
        assert!(frame["timestamp"].as_str().unwrap().contains('T'));
    }
}

#[tokio::test]
async fn test_leaving_announces_user_leave() {
    // Test: closing a main-channel connection broadcasts user_leave with
    // the identity used at join time
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut alice = connect(addr, "/room/lobby?token=alice-token").await;
    recv_json(&mut alice).await; // alice's own join
    let mut bob = connect(addr, "/room/lobby").await;
    recv_json(&mut alice).await; // bob's join
    recv_json(&mut bob).await;

    // when:
    bob.close(None).await.unwrap();

    // then:
    let frame = recv_json(&mut alice).await;
    assert_eq!(frame, json!({"type": "user_leave", "username": "Anonymous"}));
}

#[tokio::test]
async fn test_empty_chat_frame_is_silently_ignored() {
    // Test: a frame without a message produces neither an error nor a
    // broadcast
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut alice = connect(addr, "/room/lobby").await;
    recv_json(&mut alice).await; // own join

    // when:
    send_json(&mut alice, json!({"something": "else"})).await;

    // then:
    assert_no_frame(&mut alice).await;
}

#[tokio::test]
async fn test_malformed_frame_gets_error_and_session_stays_open() {
    // Test: unparsable input is answered with an error frame and the
    // session keeps working
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut alice = connect(addr, "/room/lobby").await;
    recv_json(&mut alice).await; // own join

    // when:
    alice
        .send(Message::Text("this is not json".into()))
        .await
        .unwrap();

    // then:
    let frame = recv_json(&mut alice).await;
    assert_eq!(frame, json!({"error": "Invalid message format"}));

    // still open: a valid message round-trips
    send_json(&mut alice, json!({"message": "still here"})).await;
    let frame = recv_json(&mut alice).await;
    assert_eq!(frame["message"], "still here");
}

#[tokio::test]
async fn test_invalid_vote_is_rejected_to_sender_only() {
    // Test: a null vote yields exactly one error frame to the sender and no
    // broadcast to the group
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut voter = connect(addr, "/room/lobby/vote").await;
    let mut watcher = connect(addr, "/room/lobby/vote").await;

    // when:
    send_json(&mut voter, json!({"vote": null})).await;

    // then:
    let frame = recv_json(&mut voter).await;
    assert_eq!(frame, json!({"error": "Invalid vote value"}));
    assert_no_frame(&mut voter).await;
    assert_no_frame(&mut watcher).await;
}

#[tokio::test]
async fn test_vote_payload_reaches_the_vote_group() {
    // Test: a valid vote is fanned out unchanged, sender included
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut voter = connect(addr, "/room/lobby/vote").await;
    let mut watcher = connect(addr, "/room/lobby/vote").await;

    // when:
    send_json(&mut voter, json!({"vote": {"meme_id": 7}})).await;

    // then:
    for client in [&mut voter, &mut watcher] {
        let frame = recv_json(client).await;
        assert_eq!(frame, json!({"action": "vote", "vote": {"meme_id": 7}}));
    }
}

#[tokio::test]
async fn test_meme_update_reaches_the_meme_group() {
    // Test: meme updates relay on their own sub-channel with the
    // update_meme action
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut editor = connect(addr, "/room/lobby/meme").await;

    // when:
    send_json(&mut editor, json!({"meme_update": {"caption": "such wow"}})).await;

    // then:
    let frame = recv_json(&mut editor).await;
    assert_eq!(
        frame,
        json!({"action": "update_meme", "meme_update": {"caption": "such wow"}})
    );
}

#[tokio::test]
async fn test_countdown_streams_to_every_timer_session() {
    // Test: a timer request produces the full decrement stream on all timer
    // connections of the room
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut requester = connect(addr, "/room/lobby/timer").await;
    let mut observer = connect(addr, "/room/lobby/timer").await;

    // when:
    send_json(&mut requester, json!({"seconds": 2})).await;

    // then:
    for expected in [1, 0] {
        for client in [&mut requester, &mut observer] {
            let frame = recv_json(client).await;
            assert_eq!(frame, json!({"action": "timer", "time_left": expected}));
        }
    }
}

#[tokio::test]
async fn test_non_positive_timer_value_is_rejected() {
    // Test: zero and negative seconds produce the timer error frame
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;
    let mut requester = connect(addr, "/room/lobby/timer").await;

    // when / then:
    send_json(&mut requester, json!({"seconds": 0})).await;
    let frame = recv_json(&mut requester).await;
    assert_eq!(frame, json!({"error": "Invalid timer value"}));

    send_json(&mut requester, json!({"seconds": -5})).await;
    let frame = recv_json(&mut requester).await;
    assert_eq!(frame, json!({"error": "Invalid timer value"}));
}

#[tokio::test]
async fn test_required_auth_sends_error_frame_without_joining() {
    // Test: under --require-auth an unidentified main-channel caller gets a
    // structured error over the accepted handshake, and members see no
    // presence for it
    // given:
    let addr = spawn_server(AuthPolicy::Required).await;
    let mut alice = connect(addr, "/room/lobby?token=alice-token").await;
    recv_json(&mut alice).await; // own join

    // when:
    let mut stranger = connect(addr, "/room/lobby").await;

    // then:
    let frame = recv_json(&mut stranger).await;
    assert_eq!(frame, json!({"error": "Authentication required"}));
    assert_no_frame(&mut alice).await;
}

#[tokio::test]
async fn test_invalid_room_name_rejects_the_handshake() {
    // Test: a malformed room path parameter fails the upgrade itself
    // given:
    let addr = spawn_server(AuthPolicy::AllowAnonymous).await;

    // when:
    let url = format!("ws://{}/room/{}", addr, "bad.name");
    let result = connect_async(&url).await;

    // then:
    assert!(result.is_err());
}
