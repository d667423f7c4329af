//! UseCase: 接続受け入れ処理
//!
//! トランスポートのハンドシェイク時にプレイヤーレコードを採番・登録し、
//! プッシュ用チャンネルを MessagePusher に登録します。

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, MessagePusher, PlayerId, PlayerProfile, PusherChannel};

/// 接続受け入れのユースケース
pub struct ConnectPlayerUseCase {
    /// ConnectionRegistry（接続レコードの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectPlayerUseCase {
    /// 新しい ConnectPlayerUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 接続を受け入れ、サーバー採番のプレイヤー ID を返す
    ///
    /// # Arguments
    ///
    /// * `profile` - ハンドシェイクで提示されたプレイヤープロフィール
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    pub async fn execute(&self, profile: PlayerProfile, sender: PusherChannel) -> PlayerId {
        let player_id = self.registry.register(profile).await;
        self.message_pusher
            .register_client(player_id.clone(), sender)
            .await;
        tracing::info!("Player '{}' connected", player_id.as_str());
        player_id
    }
}
