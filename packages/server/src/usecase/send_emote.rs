//! UseCase: エモート中継処理
//!
//! サーバーは即時中継のみを行い、表示寿命は追跡しません。
//! 3 秒での自己消去は受信側クライアントのプレゼンテーション層の責務。

use std::sync::Arc;

use crate::domain::{EmoteSymbol, PlayerId, Room, RoomId, RoomRepository};

use super::error::RoomIntentError;

/// エモート中継のユースケース
pub struct SendEmoteUseCase {
    /// Repository（ルーム集合の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl SendEmoteUseCase {
    /// 新しい SendEmoteUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// エモート中継を実行
    ///
    /// # Returns
    ///
    /// * `Ok((Room, EmoteSymbol))` - 配信対象ルームと検証済みシンボル
    /// * `Err(RoomIntentError)` - ルーム不存在・非メンバー・シンボル不正
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: String,
        emote_id: String,
    ) -> Result<(Room, EmoteSymbol), RoomIntentError> {
        let room_id = RoomId::new(room_id)?;
        let emote = EmoteSymbol::new(emote_id)?;

        let room = self.repository.get_room(&room_id).await?;
        if !room.is_member(player_id) {
            return Err(RoomIntentError::NotMember(player_id.as_str().to_string()));
        }

        Ok((room, emote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Cosmetics, Member, PlayerName, RoomIdFactory, RoomTitle, StageId, Timestamp,
    };
    use crate::infrastructure::repository::InMemoryRoomRepository;

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s.to_string()).unwrap()
    }

    async fn seeded_room(repository: &InMemoryRoomRepository) -> RoomId {
        let room = Room::create(
            RoomIdFactory::generate(),
            RoomTitle::new("Alpha Squad".to_string()).unwrap(),
            StageId::new("fire-drill".to_string()).unwrap(),
            4,
            Member::host(
                pid("h1"),
                PlayerName::new("H".to_string()).unwrap(),
                Cosmetics::default(),
            ),
            Timestamp::new(1000),
        );
        repository.insert_room(room).await.unwrap().id
    }

    #[tokio::test]
    async fn test_emote_from_member_passes_through() {
        // テスト項目: メンバーからのエモートが検証を通過する
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = SendEmoteUseCase::new(repository.clone());
        let room_id = seeded_room(&repository).await;

        // when (操作):
        let (room, emote) = usecase
            .execute(&pid("h1"), room_id.as_str().to_string(), "thumbs-up".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(emote.as_str(), "thumbs-up");
        assert_eq!(room.id, room_id);
        // サーバー側にはエモートの痕跡が残らない
        let stored = repository.get_room(&room_id).await.unwrap();
        assert!(stored.messages().is_empty());
    }

    #[tokio::test]
    async fn test_emote_from_non_member_is_rejected() {
        // テスト項目: 非メンバーからのエモートは NotMember で拒否される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = SendEmoteUseCase::new(repository.clone());
        let room_id = seeded_room(&repository).await;

        // when (操作):
        let result = usecase
            .execute(
                &pid("stranger"),
                room_id.as_str().to_string(),
                "wave".to_string(),
            )
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RoomIntentError::NotMember(_))));
    }
}
