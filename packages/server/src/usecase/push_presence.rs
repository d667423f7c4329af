//! UseCase: プレゼンス配信処理
//!
//! 変更後のルーム詳細を当該ルームの全メンバーへ、ルーム一覧をロビー
//! 閲覧中の全接続へ配信します。配信は常にスナップショット全体で、
//! 差分は送りません。

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, MessagePusher, PlayerId, Room};

/// プレゼンス配信のユースケース
pub struct PushPresenceUseCase {
    /// ConnectionRegistry（配信対象の選定に使用）
    registry: Arc<dyn ConnectionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl PushPresenceUseCase {
    /// 新しい PushPresenceUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 特定のクライアント 1 件に送信する（拒否メッセージなど）
    pub async fn push_to_player(&self, target: &PlayerId, json: &str) {
        if let Err(e) = self.message_pusher.push_to(target, json).await {
            tracing::warn!("Failed to push to '{}': {}", target.as_str(), e);
        }
    }

    /// 指定したターゲット群に送信する
    pub async fn push_to_players(&self, targets: Vec<PlayerId>, json: &str) {
        if let Err(e) = self.message_pusher.broadcast(targets, json).await {
            tracing::warn!("Broadcast failed: {}", e);
        }
    }

    /// ルームの全メンバーに送信する
    pub async fn push_room(&self, room: &Room, json: &str) {
        self.push_to_players(room.member_ids(), json).await;
    }

    /// ルームのメンバーのうち 1 名を除いて送信する
    /// （要求元には別イベントで応答する場合に使用）
    pub async fn push_room_except(&self, room: &Room, exclude: &PlayerId, json: &str) {
        let targets: Vec<PlayerId> = room
            .member_ids()
            .into_iter()
            .filter(|id| id != exclude)
            .collect();
        self.push_to_players(targets, json).await;
    }

    /// ロビー閲覧中（どのルームにも入っていない）の全接続に送信する
    pub async fn push_lobby(&self, json: &str) {
        let targets = self.registry.lobby_player_ids().await;
        self.push_to_players(targets, json).await;
    }
}
