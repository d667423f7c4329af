//! Local mirror of server-pushed lobby state.
//!
//! The store applies exactly the server events its current view is
//! subscribed to and ignores the rest; switching views resets the
//! room-scoped state. This is the client-side half of the
//! snapshot-broadcast contract: pushes are whole-state, so applying one
//! replaces the mirrored value instead of patching it.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use anzen_server::domain::CHAT_HISTORY_LIMIT;
use anzen_server::infrastructure::dto::websocket::{
    ErrorCode, RoomClosedReason, RoomSnapshotDto, ServerEvent,
};

use crate::stage::resolve_stage_or_default;

/// How long a received emote stays visible.
pub const EMOTE_VISIBILITY: Duration = Duration::from_millis(3000);

/// Which view the client is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientView {
    /// Browsing the lobby room list
    RoomList,
    /// Inside a room (or optimistically entering one)
    InRoom,
    /// Transitioned into a running game session
    InGame,
}

/// Local intent issued but not yet confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingEntry {
    Create,
    Join(String),
}

/// One mirrored chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub sender_name: String,
    pub message: String,
    pub seq: u64,
}

/// A transient emote shown over a member until it expires.
#[derive(Debug, Clone)]
pub struct ActiveEmote {
    pub sender_name: String,
    pub emote_id: String,
    shown_at: Instant,
}

/// The game session entered after a start-game push. The room id is
/// carried forward so the same connection is reused in-game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub room_id: String,
    pub stage: u32,
}

/// What the UI should render after applying one server event.
#[derive(Debug, Clone)]
pub enum StoreEffect {
    IdentityAssigned(String),
    RoomListRefreshed,
    EnteredRoom,
    RoomRefreshed,
    RoomClosed(RoomClosedReason),
    ChatAppended(ChatLine),
    EmoteShown { sender_name: String, emote_id: String },
    GameStarted(GameSession),
    Rejected { code: ErrorCode, message: String },
    /// Event not relevant to the current view
    Ignored,
}

/// Client-side mirror of {room list, current room, chat, emotes}.
pub struct LobbyStore {
    player_id: Option<String>,
    view: ClientView,
    rooms: Vec<RoomSnapshotDto>,
    current_room: Option<RoomSnapshotDto>,
    pending_entry: Option<PendingEntry>,
    chat: VecDeque<ChatLine>,
    emotes: HashMap<String, ActiveEmote>,
    game: Option<GameSession>,
}

impl LobbyStore {
    pub fn new() -> Self {
        Self {
            player_id: None,
            view: ClientView::RoomList,
            rooms: Vec::new(),
            current_room: None,
            pending_entry: None,
            chat: VecDeque::new(),
            emotes: HashMap::new(),
            game: None,
        }
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    pub fn view(&self) -> ClientView {
        self.view
    }

    pub fn rooms(&self) -> &[RoomSnapshotDto] {
        &self.rooms
    }

    pub fn current_room(&self) -> Option<&RoomSnapshotDto> {
        self.current_room.as_ref()
    }

    pub fn current_room_id(&self) -> Option<String> {
        self.current_room.as_ref().map(|r| r.id.clone())
    }

    pub fn chat(&self) -> &VecDeque<ChatLine> {
        &self.chat
    }

    pub fn game(&self) -> Option<&GameSession> {
        self.game.as_ref()
    }

    /// Emotes still inside their visibility window.
    pub fn active_emotes(&self, now: Instant) -> Vec<&ActiveEmote> {
        self.emotes
            .values()
            .filter(|e| now.duration_since(e.shown_at) < EMOTE_VISIBILITY)
            .collect()
    }

    /// Optimistically switch into the room view while a create intent
    /// is in flight; the authoritative `roomJoined` push confirms it.
    pub fn begin_create(&mut self) {
        self.pending_entry = Some(PendingEntry::Create);
        self.view = ClientView::InRoom;
    }

    /// Optimistically switch into the room view while a join intent is
    /// in flight.
    pub fn begin_join(&mut self, room_id: String) {
        self.pending_entry = Some(PendingEntry::Join(room_id));
        self.view = ClientView::InRoom;
    }

    /// Tear down the room view and return to the list. Room-scoped
    /// state is dropped so remounting never sees stale chat or emotes.
    pub fn leave_room_view(&mut self) {
        self.view = ClientView::RoomList;
        self.current_room = None;
        self.pending_entry = None;
        self.chat.clear();
        self.emotes.clear();
    }

    /// Apply one authoritative server push.
    ///
    /// Only the events the current view subscribes to are applied;
    /// everything else returns [`StoreEffect::Ignored`].
    pub fn apply(&mut self, event: ServerEvent, now: Instant) -> StoreEffect {
        self.prune_emotes(now);

        match event {
            ServerEvent::Connected { player_id } => {
                self.player_id = Some(player_id.clone());
                StoreEffect::IdentityAssigned(player_id)
            }

            ServerEvent::Error { code, message } => {
                // A rejected create/join rolls the optimistic view back
                if self.pending_entry.take().is_some() {
                    self.view = ClientView::RoomList;
                    self.current_room = None;
                }
                StoreEffect::Rejected { code, message }
            }

            ServerEvent::RoomsUpdated { rooms } => {
                if self.view != ClientView::RoomList {
                    return StoreEffect::Ignored;
                }
                self.rooms = rooms;
                StoreEffect::RoomListRefreshed
            }

            ServerEvent::RoomJoined { room } => {
                if self.view == ClientView::InGame {
                    return StoreEffect::Ignored;
                }
                if let Some(PendingEntry::Join(expected)) = self.pending_entry.take() {
                    if expected != room.id {
                        tracing::debug!(
                            "Confirmed into room '{}' while '{}' was pending",
                            room.id,
                            expected
                        );
                    }
                }
                self.view = ClientView::InRoom;
                self.current_room = Some(room);
                self.chat.clear();
                self.emotes.clear();
                StoreEffect::EnteredRoom
            }

            ServerEvent::RoomUpdated { room } => {
                if self.view != ClientView::InRoom || !self.is_current_room(&room.id) {
                    return StoreEffect::Ignored;
                }
                self.current_room = Some(room);
                StoreEffect::RoomRefreshed
            }

            ServerEvent::RoomClosed { room_id, reason } => {
                if self.view != ClientView::InRoom || !self.is_current_room(&room_id) {
                    return StoreEffect::Ignored;
                }
                self.leave_room_view();
                StoreEffect::RoomClosed(reason)
            }

            ServerEvent::StartGame { room_id, stage_id } => {
                if self.view != ClientView::InRoom || !self.is_current_room(&room_id) {
                    return StoreEffect::Ignored;
                }
                let session = GameSession {
                    room_id,
                    stage: resolve_stage_or_default(&stage_id),
                };
                self.view = ClientView::InGame;
                self.game = Some(session.clone());
                StoreEffect::GameStarted(session)
            }

            ServerEvent::ChatMessageReceived {
                room_id,
                sender_name,
                message,
                seq,
                ..
            } => {
                if self.view != ClientView::InRoom || !self.is_current_room(&room_id) {
                    return StoreEffect::Ignored;
                }
                let line = ChatLine {
                    sender_name,
                    message,
                    seq,
                };
                self.chat.push_back(line.clone());
                while self.chat.len() > CHAT_HISTORY_LIMIT {
                    self.chat.pop_front();
                }
                StoreEffect::ChatAppended(line)
            }

            ServerEvent::EmoteReceived {
                room_id,
                sender_id,
                sender_name,
                emote_id,
            } => {
                if self.view != ClientView::InRoom || !self.is_current_room(&room_id) {
                    return StoreEffect::Ignored;
                }
                self.emotes.insert(
                    sender_id,
                    ActiveEmote {
                        sender_name: sender_name.clone(),
                        emote_id: emote_id.clone(),
                        shown_at: now,
                    },
                );
                StoreEffect::EmoteShown {
                    sender_name,
                    emote_id,
                }
            }
        }
    }

    fn is_current_room(&self, room_id: &str) -> bool {
        self.current_room
            .as_ref()
            .is_some_and(|room| room.id == room_id)
    }

    fn prune_emotes(&mut self, now: Instant) {
        self.emotes
            .retain(|_, e| now.duration_since(e.shown_at) < EMOTE_VISIBILITY);
    }
}

impl Default for LobbyStore {
    fn default() -> Self {
        Self::new()
    }
}
