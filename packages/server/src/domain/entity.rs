//! Room entity and the lifecycle state machine.
//!
//! All invariants live here: exactly one host per room, member count
//! bounded by capacity, ready-state convergence and the
//! `Waiting → ReadyToStart → Started` transitions. The repository and
//! usecases only orchestrate; the rules are pure and unit-testable.

use std::collections::VecDeque;

use super::error::RoomError;
use super::value_object::{
    ChatText, Cosmetics, PlayerId, PlayerName, RoomId, RoomTitle, StageId, Timestamp,
};

/// Lower capacity bound; a room is a shared session, never solo.
pub const MIN_ROOM_CAPACITY: usize = 2;
/// Upper capacity bound.
pub const MAX_ROOM_CAPACITY: usize = 6;
/// Most-recent chat entries retained per room (FIFO trim).
pub const CHAT_HISTORY_LIMIT: usize = 50;

/// Role of a room member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    /// Creator of the room; exclusive start-game authority
    Host,
    /// Joined member; must toggle ready before the host can start
    Guest,
}

/// Lifecycle phase of a room.
///
/// `Started` is terminal for the room instance; a restart requires a
/// new room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    Waiting,
    ReadyToStart,
    Started,
}

/// One member of a room.
///
/// Display name and cosmetics are copied at join time; later profile
/// changes do not retroactively update an already-joined member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: PlayerId,
    pub name: PlayerName,
    pub role: MemberRole,
    pub ready: bool,
    pub cosmetics: Cosmetics,
}

impl Member {
    /// Create the host member. The host's ready flag is not meaningful
    /// (implicitly ready to start) and stays false.
    pub fn host(id: PlayerId, name: PlayerName, cosmetics: Cosmetics) -> Self {
        Self {
            id,
            name,
            role: MemberRole::Host,
            ready: false,
            cosmetics,
        }
    }

    /// Create a guest member with ready=false.
    pub fn guest(id: PlayerId, name: PlayerName, cosmetics: Cosmetics) -> Self {
        Self {
            id,
            name,
            role: MemberRole::Guest,
            ready: false,
            cosmetics,
        }
    }

    pub fn is_host(&self) -> bool {
        self.role == MemberRole::Host
    }
}

/// One chat message in a room's bounded history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    /// Per-room emission order
    pub seq: u64,
    pub from: PlayerId,
    pub sender_name: PlayerName,
    pub text: ChatText,
    pub sent_at: Timestamp,
}

/// A named, capacity-bounded grouping of players preparing to start a
/// shared game session.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub title: RoomTitle,
    pub stage_id: StageId,
    max_players: usize,
    members: Vec<Member>,
    phase: RoomPhase,
    messages: VecDeque<ChatEntry>,
    next_seq: u64,
    pub created_at: Timestamp,
}

impl Room {
    /// Create a room with the given host as sole member.
    ///
    /// The requested capacity is clamped to
    /// [`MIN_ROOM_CAPACITY`, `MAX_ROOM_CAPACITY`] rather than rejected,
    /// matching the lenient intake policy of the lobby.
    pub fn create(
        id: RoomId,
        title: RoomTitle,
        stage_id: StageId,
        requested_capacity: usize,
        host: Member,
        created_at: Timestamp,
    ) -> Self {
        let max_players = requested_capacity.clamp(MIN_ROOM_CAPACITY, MAX_ROOM_CAPACITY);
        Self {
            id,
            title,
            stage_id,
            max_players,
            members: vec![host],
            phase: RoomPhase::Waiting,
            messages: VecDeque::new(),
            next_seq: 0,
            created_at,
        }
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    /// Members in display order: host first, then join order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn messages(&self) -> &VecDeque<ChatEntry> {
        &self.messages
    }

    /// The host member. A live room always has exactly one.
    pub fn host(&self) -> &Member {
        self.members
            .iter()
            .find(|m| m.is_host())
            .expect("a live room always has a host")
    }

    pub fn member(&self, player_id: &PlayerId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == player_id)
    }

    pub fn is_member(&self, player_id: &PlayerId) -> bool {
        self.member(player_id).is_some()
    }

    pub fn member_ids(&self) -> Vec<PlayerId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_players
    }

    pub fn guest_count(&self) -> usize {
        self.members.iter().filter(|m| !m.is_host()).count()
    }

    /// Append a guest member.
    ///
    /// Fails with `RoomFull` when the member count equals capacity and
    /// with `GameAlreadyStarted` once the room is terminal; in both
    /// cases the room state is left unchanged.
    pub fn add_guest(&mut self, member: Member) -> Result<(), RoomError> {
        if self.phase == RoomPhase::Started {
            return Err(RoomError::GameAlreadyStarted);
        }
        if self.is_full() {
            return Err(RoomError::RoomFull);
        }
        self.members.push(member);
        self.refresh_phase();
        Ok(())
    }

    /// Remove a member and re-evaluate the phase.
    ///
    /// Host removal is handled one level up (the repository destroys
    /// the whole room) so the one-host invariant never becomes
    /// observable in a violated state.
    pub fn remove_member(&mut self, player_id: &PlayerId) -> Option<Member> {
        let idx = self.members.iter().position(|m| &m.id == player_id)?;
        let removed = self.members.remove(idx);
        self.refresh_phase();
        Some(removed)
    }

    /// Flip a guest's ready flag.
    ///
    /// Returns whether the flag actually changed. A toggle from the
    /// host is a silent no-op (the host is implicitly ready).
    pub fn toggle_ready(&mut self, player_id: &PlayerId) -> Result<bool, RoomError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| &m.id == player_id)
            .ok_or_else(|| RoomError::NotMember(player_id.as_str().to_string()))?;

        if member.is_host() {
            return Ok(false);
        }

        member.ready = !member.ready;
        self.refresh_phase();
        Ok(true)
    }

    /// Transition `ReadyToStart → Started`.
    ///
    /// Only the host may start, and only while every guest is ready.
    pub fn start(&mut self, by: &PlayerId) -> Result<(), RoomError> {
        let member = self
            .member(by)
            .ok_or_else(|| RoomError::NotMember(by.as_str().to_string()))?;
        if !member.is_host() {
            return Err(RoomError::NotHost);
        }
        if self.phase != RoomPhase::ReadyToStart {
            return Err(RoomError::NotReadyToStart);
        }
        self.phase = RoomPhase::Started;
        Ok(())
    }

    /// Append a chat entry, trimming the history to the most recent
    /// [`CHAT_HISTORY_LIMIT`] entries (oldest dropped first).
    pub fn push_message(&mut self, from: &Member, text: ChatText, sent_at: Timestamp) -> ChatEntry {
        let entry = ChatEntry {
            seq: self.next_seq,
            from: from.id.clone(),
            sender_name: from.name.clone(),
            text,
            sent_at,
        };
        self.next_seq += 1;
        self.messages.push_back(entry.clone());
        while self.messages.len() > CHAT_HISTORY_LIMIT {
            self.messages.pop_front();
        }
        entry
    }

    /// Re-evaluate `Waiting` vs `ReadyToStart` after any membership or
    /// ready-flag mutation.
    ///
    /// The room is ready to start iff at least one guest exists and
    /// every guest has ready=true. The empty guest set is deliberately
    /// NOT vacuously ready: a host alone can never start.
    fn refresh_phase(&mut self) {
        if self.phase == RoomPhase::Started {
            return;
        }
        let guests: Vec<&Member> = self.members.iter().filter(|m| !m.is_host()).collect();
        self.phase = if !guests.is_empty() && guests.iter().all(|g| g.ready) {
            RoomPhase::ReadyToStart
        } else {
            RoomPhase::Waiting
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomIdFactory;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s.to_string()).unwrap()
    }

    fn pid(s: &str) -> PlayerId {
        PlayerId::new(s.to_string()).unwrap()
    }

    fn cosmetics(skin: &str) -> Cosmetics {
        Cosmetics {
            skin: skin.to_string(),
            title_name: None,
            custom_character: None,
        }
    }

    fn test_room(capacity: usize) -> Room {
        Room::create(
            RoomIdFactory::generate(),
            RoomTitle::new("Alpha Squad".to_string()).unwrap(),
            StageId::new("fire-drill".to_string()).unwrap(),
            capacity,
            Member::host(pid("host"), name("H"), cosmetics("red")),
            Timestamp::new(1000),
        )
    }

    fn guest(id: &str) -> Member {
        Member::guest(pid(id), name(id), cosmetics("blue"))
    }

    #[test]
    fn test_create_room_clamps_capacity() {
        // テスト項目: 範囲外の定員は [2,6] にクランプされる
        // given (前提条件):

        // when (操作):
        let too_small = test_room(0);
        let too_large = test_room(99);
        let in_range = test_room(4);

        // then (期待する結果):
        assert_eq!(too_small.max_players(), MIN_ROOM_CAPACITY);
        assert_eq!(too_large.max_players(), MAX_ROOM_CAPACITY);
        assert_eq!(in_range.max_players(), 4);
    }

    #[test]
    fn test_create_room_has_exactly_one_host() {
        // テスト項目: 作成直後の部屋はホスト 1 名のみで構成される
        // given (前提条件):

        // when (操作):
        let room = test_room(4);

        // then (期待する結果):
        assert_eq!(room.members().len(), 1);
        assert!(room.members()[0].is_host());
        assert_eq!(room.host().id, pid("host"));
        assert_eq!(room.phase(), RoomPhase::Waiting);
    }

    #[test]
    fn test_host_uniqueness_is_preserved_across_joins() {
        // テスト項目: ゲストが何人参加してもホストは常に 1 名
        // given (前提条件):
        let mut room = test_room(4);

        // when (操作):
        room.add_guest(guest("g1")).unwrap();
        room.add_guest(guest("g2")).unwrap();

        // then (期待する結果):
        let host_count = room.members().iter().filter(|m| m.is_host()).count();
        assert_eq!(host_count, 1);
    }

    #[test]
    fn test_join_full_room_fails_and_leaves_state_unchanged() {
        // テスト項目: 満室への参加は RoomFull で失敗し、状態は変化しない
        // given (前提条件):
        let mut room = test_room(2);
        room.add_guest(guest("g1")).unwrap();
        let before = room.member_ids();

        // when (操作):
        let result = room.add_guest(guest("g2"));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::RoomFull));
        assert_eq!(room.member_ids(), before);
        assert_eq!(room.members().len(), 2);
    }

    #[test]
    fn test_member_count_never_exceeds_capacity() {
        // テスト項目: 参加成功後の人数は常に定員以下
        // given (前提条件):
        let mut room = test_room(3);

        // when (操作):
        room.add_guest(guest("g1")).unwrap();
        room.add_guest(guest("g2")).unwrap();
        let overflow = room.add_guest(guest("g3"));

        // then (期待する結果):
        assert_eq!(overflow, Err(RoomError::RoomFull));
        assert!(room.members().len() <= room.max_players());
    }

    #[test]
    fn test_host_alone_never_reaches_ready_to_start() {
        // テスト項目: ゲスト 0 名の部屋は READY_TO_START に到達しない
        // given (前提条件): ホストのみの部屋（空集合は「全員準備完了」とみなさない）
        let room = test_room(4);

        // when (操作):

        // then (期待する結果):
        assert_eq!(room.phase(), RoomPhase::Waiting);
    }

    #[test]
    fn test_ready_to_start_iff_all_guests_ready() {
        // テスト項目: 全ゲスト ready=true のときのみ READY_TO_START になる
        // given (前提条件):
        let mut room = test_room(4);
        room.add_guest(guest("g1")).unwrap();
        room.add_guest(guest("g2")).unwrap();
        assert_eq!(room.phase(), RoomPhase::Waiting);

        // when (操作): g1 のみ準備完了
        room.toggle_ready(&pid("g1")).unwrap();

        // then (期待する結果): まだ WAITING
        assert_eq!(room.phase(), RoomPhase::Waiting);

        // when (操作): g2 も準備完了
        room.toggle_ready(&pid("g2")).unwrap();

        // then (期待する結果): READY_TO_START に遷移
        assert_eq!(room.phase(), RoomPhase::ReadyToStart);
    }

    #[test]
    fn test_ready_toggle_off_returns_to_waiting() {
        // テスト項目: READY_TO_START 中にゲストが ready を外すと WAITING に戻る
        // given (前提条件):
        let mut room = test_room(4);
        room.add_guest(guest("g1")).unwrap();
        room.toggle_ready(&pid("g1")).unwrap();
        assert_eq!(room.phase(), RoomPhase::ReadyToStart);

        // when (操作):
        room.toggle_ready(&pid("g1")).unwrap();

        // then (期待する結果):
        assert_eq!(room.phase(), RoomPhase::Waiting);
    }

    #[test]
    fn test_guest_leave_reevaluates_phase() {
        // テスト項目: 未準備ゲストの退室で残りが全員 ready なら READY_TO_START になる
        // given (前提条件):
        let mut room = test_room(4);
        room.add_guest(guest("g1")).unwrap();
        room.add_guest(guest("g2")).unwrap();
        room.toggle_ready(&pid("g1")).unwrap();
        assert_eq!(room.phase(), RoomPhase::Waiting);

        // when (操作): 未準備の g2 が退室
        room.remove_member(&pid("g2"));

        // then (期待する結果):
        assert_eq!(room.phase(), RoomPhase::ReadyToStart);
    }

    #[test]
    fn test_host_toggle_ready_is_noop() {
        // テスト項目: ホストの ready トグルは何も変更しない
        // given (前提条件):
        let mut room = test_room(4);
        room.add_guest(guest("g1")).unwrap();

        // when (操作):
        let changed = room.toggle_ready(&pid("host")).unwrap();

        // then (期待する結果):
        assert!(!changed);
        assert!(!room.host().ready);
    }

    #[test]
    fn test_start_by_guest_is_rejected() {
        // テスト項目: ゲストによる startGame は NotHost で拒否され、状態は変化しない
        // given (前提条件):
        let mut room = test_room(4);
        room.add_guest(guest("g1")).unwrap();
        room.toggle_ready(&pid("g1")).unwrap();

        // when (操作):
        let result = room.start(&pid("g1"));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::NotHost));
        assert_eq!(room.phase(), RoomPhase::ReadyToStart);
    }

    #[test]
    fn test_start_while_waiting_is_rejected() {
        // テスト項目: READY_TO_START 以外での startGame は拒否される
        // given (前提条件):
        let mut room = test_room(4);
        room.add_guest(guest("g1")).unwrap();

        // when (操作):
        let result = room.start(&pid("host"));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::NotReadyToStart));
        assert_eq!(room.phase(), RoomPhase::Waiting);
    }

    #[test]
    fn test_start_transitions_to_started_and_is_terminal() {
        // テスト項目: ホストの startGame で STARTED になり、以後は終端状態
        // given (前提条件):
        let mut room = test_room(4);
        room.add_guest(guest("g1")).unwrap();
        room.toggle_ready(&pid("g1")).unwrap();

        // when (操作):
        room.start(&pid("host")).unwrap();

        // then (期待する結果):
        assert_eq!(room.phase(), RoomPhase::Started);

        // 開始後の参加は GameAlreadyStarted で拒否される
        assert_eq!(
            room.add_guest(guest("late")),
            Err(RoomError::GameAlreadyStarted)
        );
        // 開始後の退室でもフェーズは STARTED のまま
        room.remove_member(&pid("g1"));
        assert_eq!(room.phase(), RoomPhase::Started);
    }

    #[test]
    fn test_chat_history_trims_to_limit_fifo() {
        // テスト項目: 51 件目のチャットで最古の 1 件が捨てられる（FIFO）
        // given (前提条件):
        let mut room = test_room(2);
        room.add_guest(guest("g1")).unwrap();
        let sender = room.member(&pid("g1")).unwrap().clone();

        // when (操作): 51 件送信
        for i in 0..=CHAT_HISTORY_LIMIT {
            let text = ChatText::new(format!("message {}", i)).unwrap();
            room.push_message(&sender, text, Timestamp::new(i as i64));
        }

        // then (期待する結果):
        assert_eq!(room.messages().len(), CHAT_HISTORY_LIMIT);
        assert_eq!(room.messages().front().unwrap().text.as_str(), "message 1");
        assert_eq!(
            room.messages().back().unwrap().text.as_str(),
            format!("message {}", CHAT_HISTORY_LIMIT)
        );
    }

    #[test]
    fn test_chat_entries_carry_emission_order() {
        // テスト項目: チャットの seq が送信順に単調増加する
        // given (前提条件):
        let mut room = test_room(2);
        room.add_guest(guest("g1")).unwrap();
        let sender = room.member(&pid("g1")).unwrap().clone();

        // when (操作):
        let first = room.push_message(
            &sender,
            ChatText::new("a".to_string()).unwrap(),
            Timestamp::new(1),
        );
        let second = room.push_message(
            &sender,
            ChatText::new("b".to_string()).unwrap(),
            Timestamp::new(2),
        );

        // then (期待する結果):
        assert_eq!(first.seq, 0);
        assert_eq!(second.seq, 1);
    }

    #[test]
    fn test_cosmetics_are_frozen_at_join() {
        // テスト項目: 参加時のコスメティックはスナップショットであり共有されない
        // given (前提条件):
        let mut room = test_room(4);
        let mut original = cosmetics("green");
        room.add_guest(Member::guest(pid("g1"), name("g1"), original.clone()))
            .unwrap();

        // when (操作): 参加後に元のプロフィール側を変更
        original.skin = "gold".to_string();

        // then (期待する結果): 部屋のメンバーは参加時の値のまま
        assert_eq!(room.member(&pid("g1")).unwrap().cosmetics.skin, "green");
    }
}
