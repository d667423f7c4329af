//! Data Transfer Objects (DTOs) for the lobby.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (the lobby wire contract)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
