//! Connection registry trait 定義
//!
//! 1 つのトランスポート接続につき 1 つのプレイヤーレコードを管理する
//! インターフェース。具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;

use super::{Cosmetics, PlayerId, PlayerName, RoomId};

/// Identity attached to a live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: PlayerName,
    pub cosmetics: Cosmetics,
}

/// One live connection's player record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSession {
    pub profile: PlayerProfile,
    /// Room the connection currently occupies, if any
    pub current_room: Option<RoomId>,
}

/// Connection Registry trait
///
/// プレイヤーレコードの唯一の所有者。Room 側はプレイヤー ID という
/// 非所有参照のみを保持する。
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を登録し、サーバー採番のプレイヤー ID を返す。
    async fn register(&self, profile: PlayerProfile) -> PlayerId;

    /// 接続を登録解除する。
    ///
    /// 未知の ID は no-op（冪等）。クリーンアップ中に切断が二重に
    /// 通知されることがあるため。
    async fn unregister(&self, player_id: &PlayerId) -> Option<PlayerSession>;

    /// プレイヤーのプロフィールを取得する。
    async fn profile(&self, player_id: &PlayerId) -> Option<PlayerProfile>;

    /// 接続の現在のルーム参照を更新する。
    async fn set_room(&self, player_id: &PlayerId, room: Option<RoomId>);

    /// 接続の現在のルーム参照を取得する。
    async fn room_of(&self, player_id: &PlayerId) -> Option<RoomId>;

    /// ロビー（どのルームにも入っていない）接続の ID リストを返す。
    /// ルーム一覧プッシュの配信対象。
    async fn lobby_player_ids(&self) -> Vec<PlayerId>;

    /// 接続中のプレイヤー数を取得する。
    async fn count_connected(&self) -> usize;
}
