//! UseCase: ルーム作成処理
//!
//! 作成者をホストとして自動参加させたルームを登録します。
//! 定員は [2,6] にクランプされ、範囲外入力でも拒否はしません。

use std::sync::Arc;

use anzen_shared::time::Clock;

use crate::domain::{
    ConnectionRegistry, Cosmetics, Member, PlayerId, PlayerName, Room, RoomIdFactory,
    RoomRepository, RoomTitle, StageId, Timestamp,
};

use super::error::RoomIntentError;

/// Raw `createRoom` intent payload.
pub struct CreateRoomInput {
    pub title: String,
    pub host_name: String,
    pub max_players: usize,
    pub stage_id: String,
    pub skin: String,
    pub title_name: Option<String>,
    pub custom_character: Option<String>,
}

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（ルーム集合の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// ConnectionRegistry（接続レコードの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// Clock（作成時刻の供給源）
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        registry: Arc<dyn ConnectionRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            registry,
            clock,
        }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 作成されたルームのスナップショット（ホスト 1 名）
    /// * `Err(RoomIntentError)` - 入力不正、または既に別ルームに所属
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        input: CreateRoomInput,
    ) -> Result<Room, RoomIntentError> {
        let title = RoomTitle::new(input.title)?;
        let stage_id = StageId::new(input.stage_id)?;
        let host_name = PlayerName::new(input.host_name)?;

        // コスメティックは参加時点の値のコピー（スナップショット）
        let host = Member::host(
            player_id.clone(),
            host_name,
            Cosmetics {
                skin: input.skin,
                title_name: input.title_name,
                custom_character: input.custom_character,
            },
        );
        let room = Room::create(
            RoomIdFactory::generate(),
            title,
            stage_id,
            input.max_players,
            host,
            Timestamp::new(self.clock.now_jst_millis()),
        );

        let room = self.repository.insert_room(room).await?;
        self.registry
            .set_room(player_id, Some(room.id.clone()))
            .await;

        tracing::info!(
            "Room '{}' ({}) created by '{}'",
            room.title.as_str(),
            room.id.as_str(),
            player_id.as_str()
        );
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerProfile, RoomPhase};
    use crate::infrastructure::repository::{InMemoryConnectionRegistry, InMemoryRoomRepository};
    use anzen_shared::time::FixedClock;

    const PINNED_MILLIS: i64 = 1_700_000_000_000;

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(PINNED_MILLIS))
    }

    fn input(title: &str, max_players: usize) -> CreateRoomInput {
        CreateRoomInput {
            title: title.to_string(),
            host_name: "H".to_string(),
            max_players,
            stage_id: "fire-drill".to_string(),
            skin: "red".to_string(),
            title_name: None,
            custom_character: None,
        }
    }

    async fn connected_player(registry: &InMemoryConnectionRegistry, name: &str) -> PlayerId {
        registry
            .register(PlayerProfile {
                name: PlayerName::new(name.to_string()).unwrap(),
                cosmetics: Cosmetics::default(),
            })
            .await
    }

    #[tokio::test]
    async fn test_create_room_auto_joins_host() {
        // テスト項目: 作成者がホストとして自動参加し、接続のルーム参照が更新される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = CreateRoomUseCase::new(repository.clone(), registry.clone(), fixed_clock());
        let player_id = connected_player(&registry, "H").await;

        // when (操作):
        let room = usecase.execute(&player_id, input("Alpha Squad", 4)).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.members().len(), 1);
        assert!(room.members()[0].is_host());
        assert_eq!(room.phase(), RoomPhase::Waiting);
        assert_eq!(room.created_at.value(), PINNED_MILLIS);
        assert_eq!(registry.room_of(&player_id).await, Some(room.id.clone()));
        assert_eq!(repository.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_create_room_clamps_out_of_range_capacity() {
        // テスト項目: 範囲外の定員は拒否ではなくクランプされる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = CreateRoomUseCase::new(repository, registry.clone(), fixed_clock());
        let player_id = connected_player(&registry, "H").await;

        // when (操作):
        let room = usecase.execute(&player_id, input("Alpha Squad", 99)).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.max_players(), 6);
    }

    #[tokio::test]
    async fn test_create_room_rejects_empty_title() {
        // テスト項目: 空のタイトルは InvalidInput で拒否される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = CreateRoomUseCase::new(repository.clone(), registry.clone(), fixed_clock());
        let player_id = connected_player(&registry, "H").await;

        // when (操作):
        let result = usecase.execute(&player_id, input("   ", 4)).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RoomIntentError::InvalidInput(_))));
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_create_room_while_in_room_fails() {
        // テスト項目: ルーム所属中の作成は AlreadyInRoom で拒否される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = CreateRoomUseCase::new(repository.clone(), registry.clone(), fixed_clock());
        let player_id = connected_player(&registry, "H").await;
        usecase.execute(&player_id, input("First", 4)).await.unwrap();

        // when (操作):
        let result = usecase.execute(&player_id, input("Second", 4)).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RoomIntentError::AlreadyInRoom(_))));
        assert_eq!(repository.count_rooms().await, 1);
    }
}
