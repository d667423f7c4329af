//! Multiplayer lobby server for the Anzen safety-training game.
//!
//! Tracks connections, coordinates rooms over WebSocket and triggers
//! synchronized game starts.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin anzen-server
//! cargo run --bin anzen-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use anzen_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRegistry, InMemoryRoomRepository},
    },
    ui::{Server, state::AppState},
    usecase::{
        ConnectPlayerUseCase, CreateRoomUseCase, DisconnectPlayerUseCase, GetRoomsUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, PushPresenceUseCase, SendChatMessageUseCase,
        SendEmoteUseCase, StartGameUseCase, ToggleReadyUseCase,
    },
};
use anzen_shared::logger::setup_logger;
use anzen_shared::time::SystemClock;
use clap::Parser;
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "anzen-server")]
#[command(about = "Multiplayer lobby server for the Anzen safety-training game", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Stores (room repository + connection registry)
    // 2. MessagePusher
    // 3. UseCases
    // 4. AppState / Server

    // 1. Create stores (in-memory)
    let repository = Arc::new(InMemoryRoomRepository::new());
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let clock = Arc::new(SystemClock);

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let connect_player_usecase = Arc::new(ConnectPlayerUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(repository.clone(), registry.clone()));
    let disconnect_player_usecase = Arc::new(DisconnectPlayerUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        leave_room_usecase.clone(),
    ));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(
        repository.clone(),
        registry.clone(),
        clock.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(repository.clone(), registry.clone()));
    let toggle_ready_usecase = Arc::new(ToggleReadyUseCase::new(repository.clone()));
    let start_game_usecase = Arc::new(StartGameUseCase::new(repository.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let send_chat_message_usecase = Arc::new(SendChatMessageUseCase::new(
        repository.clone(),
        clock.clone(),
    ));
    let send_emote_usecase = Arc::new(SendEmoteUseCase::new(repository.clone()));
    let push_presence_usecase = Arc::new(PushPresenceUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));

    // 4. Create and run the server
    let state = AppState {
        connect_player_usecase,
        disconnect_player_usecase,
        create_room_usecase,
        join_room_usecase,
        leave_room_usecase,
        toggle_ready_usecase,
        start_game_usecase,
        get_rooms_usecase,
        send_chat_message_usecase,
        send_emote_usecase,
        push_presence_usecase,
        dispatch: Mutex::new(()),
    };
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
