//! WebSocket client session management.
//!
//! One session = one connection: a read task mirrors server pushes into
//! the [`LobbyStore`], a rustyline thread feeds user input to a write
//! task that turns commands into intents on the same connection.

use std::sync::Arc;
use std::time::Instant;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use anzen_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use crate::{
    commands::{Command, HELP_TEXT, parse_command},
    error::ClientError,
    formatter::MessageFormatter,
    store::{LobbyStore, StoreEffect},
    ui::redisplay_prompt,
};

/// Connection parameters for one client session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub url: String,
    pub username: String,
    pub skin: String,
    pub title_name: Option<String>,
    pub custom_character: Option<String>,
}

impl SessionConfig {
    /// Build the handshake URL carrying the player profile.
    fn handshake_url(&self) -> String {
        let mut url = format!("{}?username={}&skin={}", self.url, self.username, self.skin);
        if let Some(title_name) = &self.title_name {
            url.push_str(&format!("&titleName={}", title_name));
        }
        if let Some(custom_character) = &self.custom_character {
            url.push_str(&format!("&customCharacter={}", custom_character));
        }
        url
    }
}

/// Run one WebSocket client session until the connection ends.
pub async fn run_client_session(
    config: &SessionConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = config.handshake_url();

    let (ws_stream, _response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            return Err(Box::new(ClientError::ConnectionError(e.to_string())));
        }
    };

    tracing::info!("Connected to lobby server!");
    println!(
        "\nYou are '{}'. Type /help for commands. Press Ctrl+C to exit.\n",
        config.username
    );

    let (mut write, mut read) = ws_stream.split();
    let store = Arc::new(Mutex::new(LobbyStore::new()));

    // Spawn a task to mirror server pushes into the local store
    let store_for_read = store.clone();
    let username_for_read = config.username.clone();
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let event = match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Unrecognized push: {} ({})", text, e);
                            continue;
                        }
                    };

                    let output = {
                        let mut store = store_for_read.lock().await;
                        let effect = store.apply(event, Instant::now());
                        render_effect(&store, effect)
                    };
                    if let Some(output) = output {
                        print!("{}", output);
                        redisplay_prompt(&username_for_read);
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_name = config.username.clone();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt_name);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn input lines into intents
    let store_for_write = store.clone();
    let config_for_write = config.clone();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let event = {
                let mut store = store_for_write.lock().await;
                build_intent(&mut store, &config_for_write, parse_command(&line))
            };

            let event = match event {
                IntentOutcome::Send(event) => event,
                IntentOutcome::Local(output) => {
                    print!("{}", output);
                    redisplay_prompt(&config_for_write.username);
                    continue;
                }
            };

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize intent: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send intent: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}

/// Either an intent to put on the wire, or output handled locally.
enum IntentOutcome {
    Send(ClientEvent),
    Local(String),
}

/// Translate one parsed command into an intent, updating optimistic
/// view state as a side effect.
fn build_intent(
    store: &mut LobbyStore,
    config: &SessionConfig,
    command: Command,
) -> IntentOutcome {
    match command {
        Command::Rooms => IntentOutcome::Send(ClientEvent::GetRooms),

        Command::Create {
            title,
            max_players,
            stage_id,
        } => {
            store.begin_create();
            IntentOutcome::Send(ClientEvent::CreateRoom {
                title,
                host_name: config.username.clone(),
                max_players,
                stage_id,
                skin: config.skin.clone(),
                title_name: config.title_name.clone(),
                custom_character: config.custom_character.clone(),
            })
        }

        Command::Join { room_id } => {
            store.begin_join(room_id.clone());
            IntentOutcome::Send(ClientEvent::JoinRoom {
                room_id,
                username: config.username.clone(),
                skin: config.skin.clone(),
                title_name: config.title_name.clone(),
                custom_character: config.custom_character.clone(),
            })
        }

        Command::Leave => match store.current_room_id() {
            Some(room_id) => {
                // View teardown happens locally; the lobby list push
                // will refresh the list view.
                store.leave_room_view();
                IntentOutcome::Send(ClientEvent::LeaveRoom { room_id })
            }
            None => IntentOutcome::Local("\n! You are not in a room\n".to_string()),
        },

        Command::Ready => match store.current_room_id() {
            Some(room_id) => IntentOutcome::Send(ClientEvent::PlayerReady { room_id }),
            None => IntentOutcome::Local("\n! You are not in a room\n".to_string()),
        },

        Command::Start => match store.current_room_id() {
            Some(room_id) => IntentOutcome::Send(ClientEvent::StartGame { room_id }),
            None => IntentOutcome::Local("\n! You are not in a room\n".to_string()),
        },

        Command::Emote { emote_id } => match store.current_room_id() {
            Some(room_id) => IntentOutcome::Send(ClientEvent::SendEmote {
                room_id,
                emote_id,
                sender_name: config.username.clone(),
            }),
            None => IntentOutcome::Local("\n! You are not in a room\n".to_string()),
        },

        Command::Chat(message) => match store.current_room_id() {
            Some(room_id) => IntentOutcome::Send(ClientEvent::SendChatMessage {
                room_id,
                message,
                sender_name: config.username.clone(),
            }),
            None => IntentOutcome::Local(
                "\n! Join a room to chat (see /rooms, /join)\n".to_string(),
            ),
        },

        Command::Help => IntentOutcome::Local(format!("\n{}", HELP_TEXT)),
        Command::Invalid(message) => IntentOutcome::Local(format!("\n! {}\n", message)),
    }
}

/// Turn one applied effect into display output.
fn render_effect(store: &LobbyStore, effect: StoreEffect) -> Option<String> {
    match effect {
        StoreEffect::IdentityAssigned(player_id) => {
            tracing::debug!("Assigned player id '{}'", player_id);
            None
        }
        StoreEffect::RoomListRefreshed => {
            Some(MessageFormatter::format_room_list(store.rooms()))
        }
        StoreEffect::EnteredRoom | StoreEffect::RoomRefreshed => store
            .current_room()
            .map(MessageFormatter::format_room_detail),
        StoreEffect::RoomClosed(reason) => Some(MessageFormatter::format_room_closed(reason)),
        StoreEffect::ChatAppended(line) => Some(MessageFormatter::format_chat_line(&line)),
        StoreEffect::EmoteShown {
            sender_name,
            emote_id,
        } => Some(MessageFormatter::format_emote(&sender_name, &emote_id)),
        StoreEffect::GameStarted(session) => Some(MessageFormatter::format_game_start(&session)),
        StoreEffect::Rejected { message, .. } => {
            Some(MessageFormatter::format_rejection(&message))
        }
        StoreEffect::Ignored => None,
    }
}
