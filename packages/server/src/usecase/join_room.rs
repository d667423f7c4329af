//! UseCase: ルーム参加処理
//!
//! ゲストとしての参加。コスメティックは参加時点の値をコピーして
//! メンバーに固定します（後からのプロフィール変更は反映されない）。

use std::sync::Arc;

use crate::domain::{
    ConnectionRegistry, Cosmetics, Member, PlayerId, PlayerName, Room, RoomId, RoomRepository,
};

use super::error::RoomIntentError;

/// Raw `joinRoom` intent payload.
pub struct JoinRoomInput {
    pub username: String,
    pub skin: String,
    pub title_name: Option<String>,
    pub custom_character: Option<String>,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（ルーム集合の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// ConnectionRegistry（接続レコードの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 参加後のルームスナップショット
    /// * `Err(RoomIntentError)` - 満室・不存在・多重所属・開始済みなど
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: String,
        input: JoinRoomInput,
    ) -> Result<Room, RoomIntentError> {
        let room_id = RoomId::new(room_id)?;
        let username = PlayerName::new(input.username)?;

        let member = Member::guest(
            player_id.clone(),
            username,
            Cosmetics {
                skin: input.skin,
                title_name: input.title_name,
                custom_character: input.custom_character,
            },
        );

        let room = self.repository.add_member(&room_id, member).await?;
        self.registry
            .set_room(player_id, Some(room.id.clone()))
            .await;

        tracing::info!(
            "Player '{}' joined room '{}' ({}/{})",
            player_id.as_str(),
            room.id.as_str(),
            room.members().len(),
            room.max_players()
        );
        Ok(room)
    }
}
