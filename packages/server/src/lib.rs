//! Multiplayer lobby server library for the Anzen safety-training game.
//!
//! Tracks connected players, organizes them into capacity-bounded rooms
//! with host/guest roles, converges ready state and triggers synchronized
//! game-start transitions over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
