//! UseCase: ルーム退室処理
//!
//! 明示的な leaveRoom と切断による退室の両方がここを通ります。
//! ホスト退室はルームごと破棄し、残りメンバーを全員退去させます。

use std::sync::Arc;

use crate::domain::{
    ConnectionRegistry, PlayerId, RemoveMemberOutcome, RoomId, RoomRepository,
};

use super::error::RoomIntentError;

/// Why the member is leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveReason {
    /// Explicit `leaveRoom` intent
    Explicit,
    /// Transport connection closed
    Disconnect,
}

/// ルーム退室のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（ルーム集合の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// ConnectionRegistry（接続レコードの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// ルーム退室を実行
    ///
    /// # Returns
    ///
    /// * `Ok(RemoveMemberOutcome)` - 存続（更新後スナップショット）または
    ///   破棄（退去者リスト付き）
    /// * `Err(RoomIntentError)` - ルーム不存在・非メンバー
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        room_id: String,
        reason: LeaveReason,
    ) -> Result<RemoveMemberOutcome, RoomIntentError> {
        let room_id = RoomId::new(room_id)?;

        let outcome = self.repository.remove_member(&room_id, player_id).await?;
        self.registry.set_room(player_id, None).await;

        match &outcome {
            RemoveMemberOutcome::Updated(room) => {
                tracing::info!(
                    "Player '{}' left room '{}' ({:?}), {} member(s) remain",
                    player_id.as_str(),
                    room.id.as_str(),
                    reason,
                    room.members().len()
                );
            }
            RemoveMemberOutcome::Destroyed { room, evicted } => {
                // 退去者の接続レコードもロビーに戻す
                for evicted_id in evicted {
                    self.registry.set_room(evicted_id, None).await;
                }
                tracing::info!(
                    "Room '{}' destroyed ({:?} by '{}'), {} member(s) evicted",
                    room.id.as_str(),
                    reason,
                    player_id.as_str(),
                    evicted.len()
                );
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Cosmetics, Member, PlayerName, PlayerProfile, Room, RoomIdFactory, RoomTitle, StageId,
        Timestamp,
    };
    use crate::infrastructure::repository::{InMemoryConnectionRegistry, InMemoryRoomRepository};

    async fn connected_player(registry: &InMemoryConnectionRegistry, name: &str) -> PlayerId {
        registry
            .register(PlayerProfile {
                name: PlayerName::new(name.to_string()).unwrap(),
                cosmetics: Cosmetics::default(),
            })
            .await
    }

    /// ホスト + ゲスト 2 名のルームを組み立てる
    async fn seeded_room(
        repository: &InMemoryRoomRepository,
        registry: &InMemoryConnectionRegistry,
    ) -> (RoomId, PlayerId, PlayerId, PlayerId) {
        let host_id = connected_player(registry, "H").await;
        let g1 = connected_player(registry, "G1").await;
        let g2 = connected_player(registry, "G2").await;

        let room = Room::create(
            RoomIdFactory::generate(),
            RoomTitle::new("Alpha Squad".to_string()).unwrap(),
            StageId::new("fire-drill".to_string()).unwrap(),
            4,
            Member::host(
                host_id.clone(),
                PlayerName::new("H".to_string()).unwrap(),
                Cosmetics::default(),
            ),
            Timestamp::new(1000),
        );
        let room_id = repository.insert_room(room).await.unwrap().id;
        for (id, name) in [(&g1, "G1"), (&g2, "G2")] {
            repository
                .add_member(
                    &room_id,
                    Member::guest(
                        id.clone(),
                        PlayerName::new(name.to_string()).unwrap(),
                        Cosmetics::default(),
                    ),
                )
                .await
                .unwrap();
            registry.set_room(id, Some(room_id.clone())).await;
        }
        registry.set_room(&host_id, Some(room_id.clone())).await;
        (room_id, host_id, g1, g2)
    }

    #[tokio::test]
    async fn test_guest_leave_updates_room_and_registry() {
        // テスト項目: ゲスト退室でルームが存続し、接続参照がロビーに戻る
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = LeaveRoomUseCase::new(repository.clone(), registry.clone());
        let (room_id, _host, g1, _g2) = seeded_room(&repository, &registry).await;

        // when (操作):
        let outcome = usecase
            .execute(&g1, room_id.as_str().to_string(), LeaveReason::Explicit)
            .await
            .unwrap();

        // then (期待する結果):
        match outcome {
            RemoveMemberOutcome::Updated(room) => assert_eq!(room.members().len(), 2),
            other => panic!("expected Updated, got {:?}", other),
        }
        assert_eq!(registry.room_of(&g1).await, None);
        assert_eq!(repository.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_host_disconnect_destroys_room_and_evicts_all() {
        // テスト項目: ホスト切断でルームが破棄され、全退去者の接続参照が戻る
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = LeaveRoomUseCase::new(repository.clone(), registry.clone());
        let (room_id, host_id, g1, g2) = seeded_room(&repository, &registry).await;

        // when (操作):
        let outcome = usecase
            .execute(
                &host_id,
                room_id.as_str().to_string(),
                LeaveReason::Disconnect,
            )
            .await
            .unwrap();

        // then (期待する結果):
        match outcome {
            RemoveMemberOutcome::Destroyed { evicted, .. } => {
                assert_eq!(evicted.len(), 2);
            }
            other => panic!("expected Destroyed, got {:?}", other),
        }
        assert_eq!(repository.count_rooms().await, 0);
        assert_eq!(registry.room_of(&g1).await, None);
        assert_eq!(registry.room_of(&g2).await, None);
        assert_eq!(registry.room_of(&host_id).await, None);
    }

    #[tokio::test]
    async fn test_leave_by_non_member_fails() {
        // テスト項目: 非メンバーの退室要求は NotMember で失敗する
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = LeaveRoomUseCase::new(repository.clone(), registry.clone());
        let (room_id, ..) = seeded_room(&repository, &registry).await;
        let stranger = connected_player(&registry, "S").await;

        // when (操作):
        let result = usecase
            .execute(
                &stranger,
                room_id.as_str().to_string(),
                LeaveReason::Explicit,
            )
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RoomIntentError::NotMember(_))));
        assert_eq!(repository.count_rooms().await, 1);
    }
}
