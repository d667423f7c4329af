//! Shared utilities for the Anzen lobby workspace.
//!
//! Time handling and logging setup used by both the lobby server and
//! the CLI client.

pub mod logger;
pub mod time;
