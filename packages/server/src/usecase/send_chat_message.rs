//! UseCase: チャット送信処理
//!
//! ルームの直近 50 件のインメモリ履歴に追記し、配信対象
//! （送信者を含む全メンバー）を返します。永続化はしません。

use std::sync::Arc;

use anzen_shared::time::Clock;

use crate::domain::{ChatEntry, ChatText, PlayerId, Room, RoomId, RoomRepository, Timestamp};

use super::error::RoomIntentError;

/// チャット送信のユースケース
pub struct SendChatMessageUseCase {
    /// Repository（ルーム集合の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// Clock（送信時刻の供給源）
    clock: Arc<dyn Clock>,
}

impl SendChatMessageUseCase {
    /// 新しい SendChatMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// チャット送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok((Room, ChatEntry))` - 更新後ルームと採番済みエントリ
    /// * `Err(RoomIntentError)` - ルーム不存在・非メンバー・本文不正
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: String,
        message: String,
    ) -> Result<(Room, ChatEntry), RoomIntentError> {
        let room_id = RoomId::new(room_id)?;
        let text = ChatText::new(message)?;

        let sent_at = Timestamp::new(self.clock.now_jst_millis());
        let (room, entry) = self
            .repository
            .append_message(&room_id, player_id, text, sent_at)
            .await?;

        tracing::debug!(
            "Chat #{} in room '{}' from '{}'",
            entry.seq,
            room.id.as_str(),
            player_id.as_str()
        );
        Ok((room, entry))
    }
}
