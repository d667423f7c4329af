//! Error types shared across the lobby domain.

use thiserror::Error;

/// Validation failure when constructing a value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("value must not be empty")]
    Empty,

    #[error("value exceeds maximum length of {0}")]
    TooLong(usize),
}

/// Rule violation inside a single room.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    /// Member count already equals the room capacity
    #[error("room is full")]
    RoomFull,

    /// The room has transitioned to `Started` and is terminal
    #[error("game already started")]
    GameAlreadyStarted,

    /// The acting player is not a member of the room
    #[error("player '{0}' is not a member of the room")]
    NotMember(String),

    /// Start-game authority belongs to the host alone
    #[error("only the host can start the game")]
    NotHost,

    /// Start requires every guest ready and at least one guest present
    #[error("room is not ready to start")]
    NotReadyToStart,
}

/// Failure reported by the room repository.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// A player may be a member of at most one room at a time
    #[error("player '{0}' is already in a room")]
    AlreadyInRoom(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// Failure reported by the message pusher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("client not found: {0}")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
