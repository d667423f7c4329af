//! InMemory Connection Registry 実装
//!
//! 接続ごとのプレイヤーレコードを HashMap で保持します。
//! レコードの生成・破棄はこの実装が唯一の所有者として行います。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionRegistry, PlayerId, PlayerIdFactory, PlayerProfile, PlayerSession, RoomId,
};

/// インメモリ Connection Registry 実装
pub struct InMemoryConnectionRegistry {
    sessions: Mutex<HashMap<PlayerId, PlayerSession>>,
}

impl InMemoryConnectionRegistry {
    /// 新しい InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, profile: PlayerProfile) -> PlayerId {
        let player_id = PlayerIdFactory::generate();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            player_id.clone(),
            PlayerSession {
                profile,
                current_room: None,
            },
        );
        tracing::debug!("Player '{}' registered", player_id.as_str());
        player_id
    }

    async fn unregister(&self, player_id: &PlayerId) -> Option<PlayerSession> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(player_id);
        if removed.is_some() {
            tracing::debug!("Player '{}' unregistered", player_id.as_str());
        }
        removed
    }

    async fn profile(&self, player_id: &PlayerId) -> Option<PlayerProfile> {
        let sessions = self.sessions.lock().await;
        sessions.get(player_id).map(|s| s.profile.clone())
    }

    async fn set_room(&self, player_id: &PlayerId, room: Option<RoomId>) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(player_id) {
            session.current_room = room;
        }
    }

    async fn room_of(&self, player_id: &PlayerId) -> Option<RoomId> {
        let sessions = self.sessions.lock().await;
        sessions.get(player_id).and_then(|s| s.current_room.clone())
    }

    async fn lobby_player_ids(&self) -> Vec<PlayerId> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .filter(|(_, session)| session.current_room.is_none())
            .map(|(id, _)| id.clone())
            .collect()
    }

    async fn count_connected(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
