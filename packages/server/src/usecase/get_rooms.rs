//! UseCase: ルーム一覧取得処理

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（ルーム集合の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加可能なルームの独立したスナップショット列を返す
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.list_rooms().await
    }
}
