//! UseCase layer: one lobby intent per module.
//!
//! Each usecase mutates through the domain traits and returns the
//! updated snapshots plus broadcast targets; serialization and the
//! actual pushes happen in the UI layer.

mod connect_player;
mod create_room;
mod disconnect_player;
mod error;
mod get_rooms;
mod join_room;
mod leave_room;
mod push_presence;
mod send_chat_message;
mod send_emote;
mod start_game;
mod toggle_ready;

pub use connect_player::ConnectPlayerUseCase;
pub use create_room::{CreateRoomInput, CreateRoomUseCase};
pub use disconnect_player::DisconnectPlayerUseCase;
pub use error::RoomIntentError;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinRoomInput, JoinRoomUseCase};
pub use leave_room::{LeaveReason, LeaveRoomUseCase};
pub use push_presence::PushPresenceUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use send_emote::SendEmoteUseCase;
pub use start_game::StartGameUseCase;
pub use toggle_ready::ToggleReadyUseCase;
