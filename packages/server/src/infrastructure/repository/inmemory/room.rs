//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 直列化の規律
//!
//! ルーム集合全体を 1 つの `Mutex` で保護し、各操作は検査と更新を
//! 1 回のロック取得内で完結させます。同一ルームへの並行した
//! join/leave/ready 操作はこのロックで直列化され、定員超過などの
//! 中間状態が観測されることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatEntry, ChatText, Member, PlayerId, RemoveMemberOutcome, RepositoryError, Room, RoomError,
    RoomId, RoomPhase, RoomRepository, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// 全アクティブルーム
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// ロック保持中に全ルーム横断でメンバーシップを検索する
    fn find_membership(rooms: &HashMap<RoomId, Room>, player_id: &PlayerId) -> Option<RoomId> {
        rooms
            .values()
            .find(|room| room.is_member(player_id))
            .map(|room| room.id.clone())
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_room(&self, room: Room) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        let owner = room.host().id.clone();
        if Self::find_membership(&rooms, &owner).is_some() {
            return Err(RepositoryError::AlreadyInRoom(
                owner.as_str().to_string(),
            ));
        }

        let snapshot = room.clone();
        rooms.insert(room.id.clone(), room);
        Ok(snapshot)
    }

    async fn add_member(&self, room_id: &RoomId, member: Member) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        if Self::find_membership(&rooms, &member.id).is_some() {
            return Err(RepositoryError::AlreadyInRoom(
                member.id.as_str().to_string(),
            ));
        }

        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.add_guest(member)?;

        Ok(room.clone())
    }

    async fn remove_member(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<RemoveMemberOutcome, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        let member = room
            .member(player_id)
            .ok_or_else(|| RoomError::NotMember(player_id.as_str().to_string()))?;

        if member.is_host() {
            // ホスト退室はルームごと破棄し、残りメンバーを全員退去させる
            let room = rooms.remove(room_id).expect("room existed under the lock");
            let evicted: Vec<PlayerId> = room
                .member_ids()
                .into_iter()
                .filter(|id| id != player_id)
                .collect();
            return Ok(RemoveMemberOutcome::Destroyed { room, evicted });
        }

        room.remove_member(player_id);
        if room.members().is_empty() {
            let room = rooms.remove(room_id).expect("room existed under the lock");
            return Ok(RemoveMemberOutcome::Destroyed {
                room,
                evicted: Vec::new(),
            });
        }

        Ok(RemoveMemberOutcome::Updated(room.clone()))
    }

    async fn toggle_ready(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.toggle_ready(player_id)?;

        Ok(room.clone())
    }

    async fn start_game(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.start(player_id)?;

        Ok(room.clone())
    }

    async fn append_message(
        &self,
        room_id: &RoomId,
        from: &PlayerId,
        text: ChatText,
        sent_at: Timestamp,
    ) -> Result<(Room, ChatEntry), RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        let sender = room
            .member(from)
            .ok_or_else(|| RoomError::NotMember(from.as_str().to_string()))?
            .clone();
        let entry = room.push_message(&sender, text, sent_at);

        Ok((room.clone(), entry))
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut snapshot: Vec<Room> = rooms
            .values()
            .filter(|room| room.phase() != RoomPhase::Started)
            .cloned()
            .collect();
        // Stable lobby ordering: oldest room first
        snapshot.sort_by(|a, b| {
            a.created_at
                .value()
                .cmp(&b.created_at.value())
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        snapshot
    }

    async fn find_room_of(&self, player_id: &PlayerId) -> Option<RoomId> {
        let rooms = self.rooms.lock().await;
        Self::find_membership(&rooms, player_id)
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
