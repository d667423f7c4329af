//! Server state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::usecase::{
    ConnectPlayerUseCase, CreateRoomUseCase, DisconnectPlayerUseCase, GetRoomsUseCase,
    JoinRoomUseCase, LeaveRoomUseCase, PushPresenceUseCase, SendChatMessageUseCase,
    SendEmoteUseCase, StartGameUseCase, ToggleReadyUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_player_usecase: Arc<ConnectPlayerUseCase>,
    pub disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub toggle_ready_usecase: Arc<ToggleReadyUseCase>,
    pub start_game_usecase: Arc<StartGameUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    pub send_emote_usecase: Arc<SendEmoteUseCase>,
    pub push_presence_usecase: Arc<PushPresenceUseCase>,
    /// Intent dispatch lock: each intent runs to completion
    /// (mutation + authoritative pushes) before the next is processed,
    /// so in-room pushes are delivered in mutation order.
    pub dispatch: Mutex<()>,
}
