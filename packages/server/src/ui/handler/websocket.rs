//! WebSocket connection handlers.
//!
//! One socket per player. The receive loop parses the typed intent
//! union and dispatches each intent to completion (mutation plus the
//! single authoritative pair of pushes) under the process-wide
//! dispatch lock, before the next intent is processed.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{Cosmetics, PlayerId, PlayerName, PlayerProfile, RemoveMemberOutcome},
    infrastructure::dto::{
        conversion::{self, chat_message_received},
        websocket::{
            ClientEvent, ErrorCode, RoomClosedReason, RoomSnapshotDto, ServerEvent,
        },
    },
    ui::state::AppState,
    usecase::{CreateRoomInput, JoinRoomInput, LeaveReason, RoomIntentError},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectQuery {
    pub username: String,
    pub skin: Option<String>,
    pub title_name: Option<String>,
    pub custom_character: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> PlayerName (Domain Model)
    let username = match PlayerName::new(query.username.clone()) {
        Ok(name) => name,
        Err(_) => {
            tracing::warn!("Invalid username in handshake: '{}'", query.username);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let profile = PlayerProfile {
        name: username,
        cosmetics: Cosmetics {
            skin: query.skin.unwrap_or_else(|| "default".to_string()),
            title_name: query.title_name,
            custom_character: query.custom_character,
        },
    };

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectPlayerUseCase to handle connection
    // (register_client is called inside the UseCase)
    let player_id = state.connect_player_usecase.execute(profile, tx).await;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, player_id, rx)))
}

/// Spawns a task that receives messages from the rx channel and pushes
/// them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    player_id: PlayerId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    // Send identity and the initial lobby list to the new connection
    {
        let connected = ServerEvent::Connected {
            player_id: player_id.as_str().to_string(),
        };
        let connected_json = serde_json::to_string(&connected).unwrap();
        if let Err(e) = sender.send(Message::Text(connected_json.into())).await {
            tracing::error!(
                "Failed to send connected ack to '{}': {}",
                player_id.as_str(),
                e
            );
            state.disconnect_player_usecase.execute(&player_id).await;
            return;
        }

        let rooms = state.get_rooms_usecase.execute().await;
        let rooms_json = serde_json::to_string(&conversion::rooms_updated(&rooms)).unwrap();
        if let Err(e) = sender.send(Message::Text(rooms_json.into())).await {
            tracing::error!(
                "Failed to send initial room list to '{}': {}",
                player_id.as_str(),
                e
            );
            state.disconnect_player_usecase.execute(&player_id).await;
            return;
        }
        tracing::info!("Sent lobby snapshot to '{}'", player_id.as_str());
    }

    let state_clone = state.clone();
    let player_id_clone = player_id.clone();

    // Spawn a task to receive intents from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            dispatch_event(&state_clone, &player_id_clone, event).await;
                        }
                        Err(e) => {
                            tracing::warn!("Failed to parse intent as JSON: {}", e);
                            let event = ServerEvent::Error {
                                code: ErrorCode::BadRequest,
                                message: "unrecognized event".to_string(),
                            };
                            let json = serde_json::to_string(&event).unwrap();
                            state_clone
                                .push_presence_usecase
                                .push_to_player(&player_id_clone, &json)
                                .await;
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", player_id_clone.as_str());
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive pushes from the lobby and send to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Disconnect is the cancellation signal: leave cleanup runs before
    // the connection is considered fully torn down.
    {
        let _guard = state.dispatch.lock().await;
        let outcome = state.disconnect_player_usecase.execute(&player_id).await;
        match outcome {
            Some(RemoveMemberOutcome::Updated(room)) => {
                let json = serde_json::to_string(&ServerEvent::RoomUpdated {
                    room: RoomSnapshotDto::from(&room),
                })
                .unwrap();
                state.push_presence_usecase.push_room(&room, &json).await;
                push_lobby_rooms(&state).await;
            }
            Some(RemoveMemberOutcome::Destroyed { room, evicted }) => {
                let json = serde_json::to_string(&ServerEvent::RoomClosed {
                    room_id: room.id.as_str().to_string(),
                    reason: RoomClosedReason::HostDisconnected,
                })
                .unwrap();
                state
                    .push_presence_usecase
                    .push_to_players(evicted, &json)
                    .await;
                push_lobby_rooms(&state).await;
            }
            None => {}
        }
    }
}

/// Process one intent to completion: mutate, then emit the
/// authoritative pushes for exactly that mutation.
async fn dispatch_event(state: &Arc<AppState>, player_id: &PlayerId, event: ClientEvent) {
    let _guard = state.dispatch.lock().await;

    match event {
        ClientEvent::GetRooms => {
            let rooms = state.get_rooms_usecase.execute().await;
            let json = serde_json::to_string(&conversion::rooms_updated(&rooms)).unwrap();
            state
                .push_presence_usecase
                .push_to_player(player_id, &json)
                .await;
        }

        ClientEvent::CreateRoom {
            title,
            host_name,
            max_players,
            stage_id,
            skin,
            title_name,
            custom_character,
        } => {
            let input = CreateRoomInput {
                title,
                host_name,
                max_players,
                stage_id,
                skin,
                title_name,
                custom_character,
            };
            match state.create_room_usecase.execute(player_id, input).await {
                Ok(room) => {
                    let json = serde_json::to_string(&ServerEvent::RoomJoined {
                        room: RoomSnapshotDto::from(&room),
                    })
                    .unwrap();
                    state
                        .push_presence_usecase
                        .push_to_player(player_id, &json)
                        .await;
                    push_lobby_rooms(state).await;
                }
                Err(e) => push_rejection(state, player_id, &e).await,
            }
        }

        ClientEvent::JoinRoom {
            room_id,
            username,
            skin,
            title_name,
            custom_character,
        } => {
            let input = JoinRoomInput {
                username,
                skin,
                title_name,
                custom_character,
            };
            match state
                .join_room_usecase
                .execute(player_id, room_id, input)
                .await
            {
                Ok(room) => {
                    let snapshot = RoomSnapshotDto::from(&room);
                    let joined = serde_json::to_string(&ServerEvent::RoomJoined {
                        room: snapshot.clone(),
                    })
                    .unwrap();
                    state
                        .push_presence_usecase
                        .push_to_player(player_id, &joined)
                        .await;

                    let updated =
                        serde_json::to_string(&ServerEvent::RoomUpdated { room: snapshot })
                            .unwrap();
                    state
                        .push_presence_usecase
                        .push_room_except(&room, player_id, &updated)
                        .await;
                    push_lobby_rooms(state).await;
                }
                Err(e) => push_rejection(state, player_id, &e).await,
            }
        }

        ClientEvent::LeaveRoom { room_id } => {
            match state
                .leave_room_usecase
                .execute(player_id, room_id, LeaveReason::Explicit)
                .await
            {
                Ok(RemoveMemberOutcome::Updated(room)) => {
                    let json = serde_json::to_string(&ServerEvent::RoomUpdated {
                        room: RoomSnapshotDto::from(&room),
                    })
                    .unwrap();
                    state.push_presence_usecase.push_room(&room, &json).await;
                    push_lobby_rooms(state).await;
                }
                Ok(RemoveMemberOutcome::Destroyed { room, evicted }) => {
                    let json = serde_json::to_string(&ServerEvent::RoomClosed {
                        room_id: room.id.as_str().to_string(),
                        reason: RoomClosedReason::HostLeft,
                    })
                    .unwrap();
                    state
                        .push_presence_usecase
                        .push_to_players(evicted, &json)
                        .await;
                    push_lobby_rooms(state).await;
                }
                Err(e) => push_rejection(state, player_id, &e).await,
            }
        }

        ClientEvent::PlayerReady { room_id } => {
            match state.toggle_ready_usecase.execute(player_id, room_id).await {
                Ok(room) => {
                    let json = serde_json::to_string(&ServerEvent::RoomUpdated {
                        room: RoomSnapshotDto::from(&room),
                    })
                    .unwrap();
                    state.push_presence_usecase.push_room(&room, &json).await;
                    push_lobby_rooms(state).await;
                }
                Err(e) => push_rejection(state, player_id, &e).await,
            }
        }

        ClientEvent::StartGame { room_id } => {
            match state.start_game_usecase.execute(player_id, room_id).await {
                Ok(room) => {
                    let json = serde_json::to_string(&ServerEvent::StartGame {
                        room_id: room.id.as_str().to_string(),
                        stage_id: room.stage_id.as_str().to_string(),
                    })
                    .unwrap();
                    state.push_presence_usecase.push_room(&room, &json).await;
                    // Started rooms drop out of the joinable list
                    push_lobby_rooms(state).await;
                }
                Err(e) => push_rejection(state, player_id, &e).await,
            }
        }

        // senderName in the payload is cosmetic; the membership snapshot
        // taken at join time is authoritative for display names.
        ClientEvent::SendChatMessage {
            room_id,
            message,
            sender_name: _,
        } => {
            match state
                .send_chat_message_usecase
                .execute(player_id, room_id, message)
                .await
            {
                Ok((room, entry)) => {
                    let json =
                        serde_json::to_string(&chat_message_received(&room, &entry)).unwrap();
                    state.push_presence_usecase.push_room(&room, &json).await;
                }
                Err(e) => push_rejection(state, player_id, &e).await,
            }
        }

        ClientEvent::SendEmote {
            room_id,
            emote_id,
            sender_name: _,
        } => {
            match state
                .send_emote_usecase
                .execute(player_id, room_id, emote_id)
                .await
            {
                Ok((room, emote)) => {
                    let sender_name = room
                        .member(player_id)
                        .map(|m| m.name.as_str().to_string())
                        .unwrap_or_default();
                    let json = serde_json::to_string(&ServerEvent::EmoteReceived {
                        room_id: room.id.as_str().to_string(),
                        sender_id: player_id.as_str().to_string(),
                        sender_name,
                        emote_id: emote.as_str().to_string(),
                    })
                    .unwrap();
                    state.push_presence_usecase.push_room(&room, &json).await;
                }
                Err(e) => push_rejection(state, player_id, &e).await,
            }
        }
    }
}

/// Push the current joinable-room list to every lobby-bound connection.
async fn push_lobby_rooms(state: &Arc<AppState>) {
    let rooms = state.get_rooms_usecase.execute().await;
    let json = serde_json::to_string(&conversion::rooms_updated(&rooms)).unwrap();
    state.push_presence_usecase.push_lobby(&json).await;
}

/// Report a failed intent back to the requesting connection only.
async fn push_rejection(state: &Arc<AppState>, player_id: &PlayerId, err: &RoomIntentError) {
    tracing::warn!("Intent from '{}' rejected: {}", player_id.as_str(), err);
    let event = ServerEvent::Error {
        code: error_code(err),
        message: err.to_string(),
    };
    let json = serde_json::to_string(&event).unwrap();
    state
        .push_presence_usecase
        .push_to_player(player_id, &json)
        .await;
}

fn error_code(err: &RoomIntentError) -> ErrorCode {
    match err {
        RoomIntentError::RoomNotFound(_) => ErrorCode::RoomNotFound,
        RoomIntentError::RoomFull => ErrorCode::RoomFull,
        RoomIntentError::AlreadyInRoom(_) => ErrorCode::AlreadyInRoom,
        RoomIntentError::GameAlreadyStarted => ErrorCode::GameAlreadyStarted,
        RoomIntentError::NotMember(_) => ErrorCode::NotMember,
        RoomIntentError::NotHost => ErrorCode::NotHost,
        RoomIntentError::NotReadyToStart => ErrorCode::NotReadyToStart,
        RoomIntentError::InvalidInput(_) => ErrorCode::BadRequest,
    }
}
