//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ通知の抽象化。UseCase 層はこの trait に
//! 依存し、WebSocket などの具体的な転送手段には依存しない。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, PlayerId};

/// Channel used to push serialized messages to one client's socket task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録する。
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除する。
    async fn unregister_client(&self, player_id: &PlayerId);

    /// 特定のクライアントにメッセージを送信する。
    async fn push_to(&self, player_id: &PlayerId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のクライアントにメッセージをブロードキャストする。
    /// 一部の送信失敗は許容される。
    async fn broadcast(&self, targets: Vec<PlayerId>, content: &str)
    -> Result<(), MessagePushError>;
}
