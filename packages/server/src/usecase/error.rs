//! UseCase 層のエラー型
//!
//! ルーム変更系インテントの失敗は全てこの 1 つの分類に正規化され、
//! UI 層で要求元クライアントへの拒否メッセージに変換されます。

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError, ValueError};

/// Rejection of one room-mutation intent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomIntentError {
    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("room is full")]
    RoomFull,

    #[error("player '{0}' is already in a room")]
    AlreadyInRoom(String),

    #[error("game already started")]
    GameAlreadyStarted,

    #[error("player '{0}' is not a member of the room")]
    NotMember(String),

    #[error("only the host can start the game")]
    NotHost,

    #[error("room is not ready to start")]
    NotReadyToStart,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValueError),
}

impl From<RoomError> for RoomIntentError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::RoomFull => Self::RoomFull,
            RoomError::GameAlreadyStarted => Self::GameAlreadyStarted,
            RoomError::NotMember(id) => Self::NotMember(id),
            RoomError::NotHost => Self::NotHost,
            RoomError::NotReadyToStart => Self::NotReadyToStart,
        }
    }
}

impl From<RepositoryError> for RoomIntentError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::RoomNotFound(id) => Self::RoomNotFound(id),
            RepositoryError::AlreadyInRoom(id) => Self::AlreadyInRoom(id),
            RepositoryError::Room(inner) => inner.into(),
        }
    }
}
