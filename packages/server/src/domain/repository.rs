//! Repository trait 定義
//!
//! ドメイン層が必要とするルーム集合へのアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatEntry, ChatText, Member, PlayerId, RepositoryError, Room, RoomId, Timestamp};

/// Result of removing a member from a room.
#[derive(Debug)]
pub enum RemoveMemberOutcome {
    /// The room survives with the remaining members
    Updated(Room),
    /// The room was torn down (host left, or it became empty);
    /// `evicted` lists the former members that must be notified,
    /// excluding the leaver itself
    Destroyed { room: Room, evicted: Vec<PlayerId> },
}

/// Room Repository trait
///
/// ルーム集合への唯一の可変アクセス経路。全ての変更操作は検査と更新を
/// 1 回のロック取得内で行い、部分的な更新が観測されることはない
/// （all-or-nothing）。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを新規登録する。
    ///
    /// オーナーが既にいずれかのルームのメンバーである場合は
    /// `AlreadyInRoom` で失敗する。
    async fn insert_room(&self, room: Room) -> Result<Room, RepositoryError>;

    /// ゲストをルームに追加し、更新後のスナップショットを返す。
    async fn add_member(&self, room_id: &RoomId, member: Member) -> Result<Room, RepositoryError>;

    /// メンバーを退室させる。
    ///
    /// ホストの退室、または最後のメンバーの退室でルームは破棄される。
    async fn remove_member(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<RemoveMemberOutcome, RepositoryError>;

    /// ゲストの ready フラグをトグルする（ホストは no-op）。
    async fn toggle_ready(&self, room_id: &RoomId, player_id: &PlayerId)
    -> Result<Room, RepositoryError>;

    /// ルームを STARTED に遷移させる（ホストのみ、READY_TO_START 中のみ）。
    async fn start_game(&self, room_id: &RoomId, player_id: &PlayerId)
    -> Result<Room, RepositoryError>;

    /// チャットメッセージをルーム履歴に追加し、更新後のルームと
    /// 採番済みエントリを返す。
    async fn append_message(
        &self,
        room_id: &RoomId,
        from: &PlayerId,
        text: ChatText,
        sent_at: Timestamp,
    ) -> Result<(Room, ChatEntry), RepositoryError>;

    /// ルームのスナップショットを取得する。
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// ロビー表示用に参加可能な（未開始の）ルームの独立したコピーを返す。
    async fn list_rooms(&self) -> Vec<Room>;

    /// プレイヤーが所属しているルームを全ルーム横断で検索する。
    async fn find_room_of(&self, player_id: &PlayerId) -> Option<RoomId>;

    /// アクティブなルーム数を取得する。
    async fn count_rooms(&self) -> usize;
}
