//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    ChatEntry, Member, MemberRole, RepositoryError, Room, RoomError, RoomPhase,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<MemberRole> for dto::MemberRoleDto {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Host => dto::MemberRoleDto::Host,
            MemberRole::Guest => dto::MemberRoleDto::Guest,
        }
    }
}

impl From<RoomPhase> for dto::RoomPhaseDto {
    fn from(phase: RoomPhase) -> Self {
        match phase {
            RoomPhase::Waiting => dto::RoomPhaseDto::Waiting,
            RoomPhase::ReadyToStart => dto::RoomPhaseDto::ReadyToStart,
            RoomPhase::Started => dto::RoomPhaseDto::Started,
        }
    }
}

impl From<&Member> for dto::MemberDto {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.as_str().to_string(),
            name: member.name.as_str().to_string(),
            role: member.role.into(),
            is_ready: member.ready,
            skin: member.cosmetics.skin.clone(),
            title_name: member.cosmetics.title_name.clone(),
            custom_character: member.cosmetics.custom_character.clone(),
        }
    }
}

impl From<&Room> for dto::RoomSnapshotDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            title: room.title.as_str().to_string(),
            host_name: room.host().name.as_str().to_string(),
            stage_id: room.stage_id.as_str().to_string(),
            max_players: room.max_players(),
            phase: room.phase().into(),
            players: room.members().iter().map(dto::MemberDto::from).collect(),
        }
    }
}

/// Build the chat push for one appended entry.
pub fn chat_message_received(room: &Room, entry: &ChatEntry) -> dto::ServerEvent {
    dto::ServerEvent::ChatMessageReceived {
        room_id: room.id.as_str().to_string(),
        sender_id: entry.from.as_str().to_string(),
        sender_name: entry.sender_name.as_str().to_string(),
        message: entry.text.as_str().to_string(),
        seq: entry.seq,
        timestamp: entry.sent_at.value(),
    }
}

/// Build the lobby list push from repository snapshots.
pub fn rooms_updated(rooms: &[Room]) -> dto::ServerEvent {
    dto::ServerEvent::RoomsUpdated {
        rooms: rooms.iter().map(dto::RoomSnapshotDto::from).collect(),
    }
}

// ========================================
// Errors → rejection codes
// ========================================

impl From<&RoomError> for dto::ErrorCode {
    fn from(err: &RoomError) -> Self {
        match err {
            RoomError::RoomFull => dto::ErrorCode::RoomFull,
            RoomError::GameAlreadyStarted => dto::ErrorCode::GameAlreadyStarted,
            RoomError::NotMember(_) => dto::ErrorCode::NotMember,
            RoomError::NotHost => dto::ErrorCode::NotHost,
            RoomError::NotReadyToStart => dto::ErrorCode::NotReadyToStart,
        }
    }
}

impl From<&RepositoryError> for dto::ErrorCode {
    fn from(err: &RepositoryError) -> Self {
        match err {
            RepositoryError::RoomNotFound(_) => dto::ErrorCode::RoomNotFound,
            RepositoryError::AlreadyInRoom(_) => dto::ErrorCode::AlreadyInRoom,
            RepositoryError::Room(inner) => inner.into(),
        }
    }
}
