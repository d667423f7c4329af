//! Display formatting for lobby state.

#![allow(dead_code)]

use anzen_server::infrastructure::dto::websocket::{
    MemberRoleDto, RoomClosedReason, RoomPhaseDto, RoomSnapshotDto,
};

use crate::store::{ChatLine, GameSession};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the lobby room list
    pub fn format_room_list(rooms: &[RoomSnapshotDto]) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str("Open rooms:\n");

        if rooms.is_empty() {
            output.push_str("(No open rooms, /create one)\n");
        } else {
            for room in rooms {
                output.push_str(&format!(
                    "{}  \"{}\"  host: {}  stage: {}  {}/{}\n",
                    room.id,
                    room.title,
                    room.host_name,
                    room.stage_id,
                    room.players.len(),
                    room.max_players
                ));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format the current room detail
    pub fn format_room_detail(room: &RoomSnapshotDto) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n--- \"{}\" ({}/{}) stage: {} {}---\n",
            room.title,
            room.players.len(),
            room.max_players,
            room.stage_id,
            if room.phase == RoomPhaseDto::ReadyToStart {
                "[ready to start] "
            } else {
                ""
            }
        ));
        for player in &room.players {
            let marker = match player.role {
                MemberRoleDto::Host => "(host)",
                MemberRoleDto::Guest => {
                    if player.is_ready {
                        "[ready]"
                    } else {
                        "[not ready]"
                    }
                }
            };
            output.push_str(&format!("  {} {}\n", player.name, marker));
        }
        output
    }

    /// Format one chat line
    pub fn format_chat_line(line: &ChatLine) -> String {
        format!("\n[{}] {}\n", line.sender_name, line.message)
    }

    /// Format a transient emote notification
    pub fn format_emote(sender_name: &str, emote_id: &str) -> String {
        format!("\n* {} sends :{}:\n", sender_name, emote_id)
    }

    /// Format the game-start transition banner
    pub fn format_game_start(session: &GameSession) -> String {
        format!(
            "\n>>> Game starting! Loading stage {} (room {}) <<<\n",
            session.stage, session.room_id
        )
    }

    /// Format a room teardown notification
    pub fn format_room_closed(reason: RoomClosedReason) -> String {
        let why = match reason {
            RoomClosedReason::HostLeft => "the host left",
            RoomClosedReason::HostDisconnected => "the host disconnected",
        };
        format!("\n! Room closed ({}), back to the lobby\n", why)
    }

    /// Format a rejection message
    pub fn format_rejection(message: &str) -> String {
        format!("\n! {}\n", message)
    }
}
