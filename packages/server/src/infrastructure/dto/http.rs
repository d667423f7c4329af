//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One row of the lobby list as returned by `GET /api/rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub title: String,
    pub host_name: String,
    pub stage_id: String,
    pub player_count: usize,
    pub max_players: usize,
    pub created_at: String,
}
