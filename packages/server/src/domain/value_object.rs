//! Value objects for the lobby domain.
//!
//! Construction validates the raw input, so an invalid value is
//! unrepresentable once it has crossed into the domain layer.

use uuid::Uuid;

use super::error::ValueError;

const MAX_PLAYER_NAME_LEN: usize = 32;
const MAX_ROOM_TITLE_LEN: usize = 64;
const MAX_CHAT_TEXT_LEN: usize = 500;
const MAX_EMOTE_SYMBOL_LEN: usize = 32;

/// Opaque identifier of one live connection's player record.
///
/// Allocated by the server at handshake time (UUID v4), never supplied
/// by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Factory for server-allocated player identifiers.
pub struct PlayerIdFactory;

impl PlayerIdFactory {
    pub fn generate() -> PlayerId {
        PlayerId(Uuid::new_v4().to_string())
    }
}

/// Display name of a player, carried into rooms as part of the member
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(value: String) -> Result<Self, ValueError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        if trimmed.chars().count() > MAX_PLAYER_NAME_LEN {
            return Err(ValueError::TooLong(MAX_PLAYER_NAME_LEN));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Process-lifetime-unique room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Factory for room identifiers.
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub fn generate() -> RoomId {
        RoomId(Uuid::new_v4().to_string())
    }
}

/// Display title of a room as shown in the lobby list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTitle(String);

impl RoomTitle {
    pub fn new(value: String) -> Result<Self, ValueError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        if trimmed.chars().count() > MAX_ROOM_TITLE_LEN {
            return Err(ValueError::TooLong(MAX_ROOM_TITLE_LEN));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomTitle {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Target stage/scenario identifier of a room.
///
/// Opaque here: the map service owns stage existence, the lobby only
/// carries the identifier through to the start-game push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageId(String);

impl StageId {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StageId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Chat message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatText(String);

impl ChatText {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Err(ValueError::Empty);
        }
        if value.chars().count() > MAX_CHAT_TEXT_LEN {
            return Err(ValueError::TooLong(MAX_CHAT_TEXT_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ChatText {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Emote symbol relayed to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoteSymbol(String);

impl EmoteSymbol {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::Empty);
        }
        if value.chars().count() > MAX_EMOTE_SYMBOL_LEN {
            return Err(ValueError::TooLong(MAX_EMOTE_SYMBOL_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmoteSymbol {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in JST (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Purely visual player attributes, copied into room membership at join
/// time (frozen at join, never a live link to the profile).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cosmetics {
    pub skin: String,
    pub title_name: Option<String>,
    pub custom_character: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_name_rejects_empty() {
        // テスト項目: 空のプレイヤー名は拒否される
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = PlayerName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::Empty));
    }

    #[test]
    fn test_player_name_is_trimmed() {
        // テスト項目: プレイヤー名の前後の空白が除去される
        // given (前提条件):
        let raw = "  alice  ".to_string();

        // when (操作):
        let name = PlayerName::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_player_name_rejects_too_long() {
        // テスト項目: 32 文字を超えるプレイヤー名は拒否される
        // given (前提条件):
        let raw = "a".repeat(33);

        // when (操作):
        let result = PlayerName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::TooLong(32)));
    }

    #[test]
    fn test_room_id_factory_generates_unique_ids() {
        // テスト項目: RoomIdFactory が一意な ID を生成する
        // given (前提条件):

        // when (操作):
        let id1 = RoomIdFactory::generate();
        let id2 = RoomIdFactory::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_chat_text_rejects_too_long() {
        // テスト項目: 500 文字を超えるチャット本文は拒否される
        // given (前提条件):
        let raw = "x".repeat(501);

        // when (操作):
        let result = ChatText::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::TooLong(500)));
    }

    #[test]
    fn test_chat_text_preserves_inner_whitespace() {
        // テスト項目: チャット本文内の空白は保持される
        // given (前提条件):
        let raw = "watch  out".to_string();

        // when (操作):
        let text = ChatText::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(text.as_str(), "watch  out");
    }
}
