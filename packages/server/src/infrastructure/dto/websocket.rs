//! WebSocket event DTOs: the lobby wire contract.
//!
//! Events are internally tagged unions (`{"type": "…", …}`): intents in
//! (`ClientEvent`) and pushes out (`ServerEvent`). Dispatch over them is
//! an exhaustive `match`, so adding an event without handling it fails
//! to compile instead of silently dropping on the floor.

use serde::{Deserialize, Serialize};

/// Client → Server intents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Request a fresh `roomsUpdated` push of the lobby list
    GetRooms,

    /// Create a room and auto-join as host
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        title: String,
        host_name: String,
        max_players: usize,
        stage_id: String,
        skin: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_character: Option<String>,
    },

    /// Join an existing room as guest
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: String,
        username: String,
        skin: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_character: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: String },

    /// Toggle the guest's ready flag
    #[serde(rename_all = "camelCase")]
    PlayerReady { room_id: String },

    /// Host-only: transition the room to STARTED
    #[serde(rename_all = "camelCase")]
    StartGame { room_id: String },

    #[serde(rename_all = "camelCase")]
    SendChatMessage {
        room_id: String,
        message: String,
        sender_name: String,
    },

    #[serde(rename_all = "camelCase")]
    SendEmote {
        room_id: String,
        emote_id: String,
        sender_name: String,
    },
}

/// Server → Client pushes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Handshake ack carrying the server-allocated player identity
    #[serde(rename_all = "camelCase")]
    Connected { player_id: String },

    /// Full lobby list refresh (joinable rooms only)
    #[serde(rename_all = "camelCase")]
    RoomsUpdated { rooms: Vec<RoomSnapshotDto> },

    /// Confirms join/create to the joining client
    #[serde(rename_all = "camelCase")]
    RoomJoined { room: RoomSnapshotDto },

    /// Authoritative room-detail snapshot after a mutation
    #[serde(rename_all = "camelCase")]
    RoomUpdated { room: RoomSnapshotDto },

    /// The room was torn down and its members evicted
    #[serde(rename_all = "camelCase")]
    RoomClosed {
        room_id: String,
        reason: RoomClosedReason,
    },

    /// Instructs all members to transition into the game session
    #[serde(rename_all = "camelCase")]
    StartGame { room_id: String, stage_id: String },

    #[serde(rename_all = "camelCase")]
    ChatMessageReceived {
        room_id: String,
        sender_id: String,
        sender_name: String,
        message: String,
        seq: u64,
        timestamp: i64,
    },

    #[serde(rename_all = "camelCase")]
    EmoteReceived {
        room_id: String,
        sender_id: String,
        sender_name: String,
        emote_id: String,
    },

    /// Rejection of one intent, delivered only to the requester
    #[serde(rename_all = "camelCase")]
    Error {
        code: ErrorCode,
        message: String,
    },
}

/// Why a room was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomClosedReason {
    HostLeft,
    HostDisconnected,
}

/// Stable rejection codes for failed intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    RoomNotFound,
    RoomFull,
    AlreadyInRoom,
    GameAlreadyStarted,
    NotMember,
    NotHost,
    NotReadyToStart,
    BadRequest,
}

/// Whole-state room snapshot pushed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshotDto {
    pub id: String,
    pub title: String,
    pub host_name: String,
    pub stage_id: String,
    pub max_players: usize,
    pub phase: RoomPhaseDto,
    pub players: Vec<MemberDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomPhaseDto {
    Waiting,
    ReadyToStart,
    Started,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberRoleDto {
    Host,
    Guest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: String,
    pub name: String,
    pub role: MemberRoleDto,
    pub is_ready: bool,
    pub skin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_character: Option<String>,
}
