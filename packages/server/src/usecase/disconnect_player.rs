//! UseCase: 切断処理
//!
//! 切断は唯一のキャンセル信号。接続が完全に破棄される前に、所属して
//! いたルームからの退室（Disconnect 理由）を同期的に実行します。
//! これを怠るとルームに幽霊メンバーが残ります。

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, MessagePusher, PlayerId, RemoveMemberOutcome};

use super::leave_room::{LeaveReason, LeaveRoomUseCase};

/// 切断のユースケース
pub struct DisconnectPlayerUseCase {
    /// ConnectionRegistry（接続レコードの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 退室処理への委譲先
    leave_room: Arc<LeaveRoomUseCase>,
}

impl DisconnectPlayerUseCase {
    /// 新しい DisconnectPlayerUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        leave_room: Arc<LeaveRoomUseCase>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            leave_room,
        }
    }

    /// 切断を実行
    ///
    /// 未知のプレイヤー ID は no-op（冪等）。クリーンアップ経路が
    /// 重複して走ることがあるため。
    ///
    /// # Returns
    ///
    /// 所属ルームがあった場合はその退室結果（UI 層が通知に使う）
    pub async fn execute(&self, player_id: &PlayerId) -> Option<RemoveMemberOutcome> {
        let outcome = match self.registry.room_of(player_id).await {
            Some(room_id) => {
                match self
                    .leave_room
                    .execute(
                        player_id,
                        room_id.as_str().to_string(),
                        LeaveReason::Disconnect,
                    )
                    .await
                {
                    Ok(outcome) => Some(outcome),
                    Err(e) => {
                        // 退室の失敗で切断クリーンアップを止めない
                        tracing::warn!(
                            "Leave on disconnect failed for '{}': {}",
                            player_id.as_str(),
                            e
                        );
                        None
                    }
                }
            }
            None => None,
        };

        self.message_pusher.unregister_client(player_id).await;
        if self.registry.unregister(player_id).await.is_some() {
            tracing::info!("Player '{}' disconnected", player_id.as_str());
        }

        outcome
    }
}
