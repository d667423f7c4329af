//! UseCase: 準備状態トグル処理

use std::sync::Arc;

use crate::domain::{PlayerId, Room, RoomId, RoomRepository};

use super::error::RoomIntentError;

/// 準備状態トグルのユースケース
pub struct ToggleReadyUseCase {
    /// Repository（ルーム集合の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ToggleReadyUseCase {
    /// 新しい ToggleReadyUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ゲストの ready フラグをトグルする
    ///
    /// ホストからのトグルは no-op だが、更新後スナップショットは返す
    /// （変更の有無にかかわらず 1 回の権威プッシュが出る）。
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: String,
    ) -> Result<Room, RoomIntentError> {
        let room_id = RoomId::new(room_id)?;
        let room = self.repository.toggle_ready(&room_id, player_id).await?;
        tracing::debug!(
            "Ready toggle by '{}' in room '{}' -> phase {:?}",
            player_id.as_str(),
            room.id.as_str(),
            room.phase()
        );
        Ok(room)
    }
}
