//! UseCase: ゲーム開始処理
//!
//! READY_TO_START 中のホストだけが STARTED への遷移を起こせる。
//! 遷移後のルームは再利用されない（再戦は新しいルームで行う）。

use std::sync::Arc;

use crate::domain::{PlayerId, Room, RoomId, RoomRepository};

use super::error::RoomIntentError;

/// ゲーム開始のユースケース
pub struct StartGameUseCase {
    /// Repository（ルーム集合の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl StartGameUseCase {
    /// 新しい StartGameUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ゲーム開始を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - STARTED に遷移したルーム（開始イベントの配信元）
    /// * `Err(RoomIntentError)` - 非ホスト・フェーズ不一致など
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: String,
    ) -> Result<Room, RoomIntentError> {
        let room_id = RoomId::new(room_id)?;
        let room = self.repository.start_game(&room_id, player_id).await?;
        tracing::info!(
            "Room '{}' started by host '{}' (stage '{}')",
            room.id.as_str(),
            player_id.as_str(),
            room.stage_id.as_str()
        );
        Ok(room)
    }
}
