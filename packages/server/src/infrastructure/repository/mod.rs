//! Repository implementations.

mod inmemory;

pub use inmemory::{InMemoryConnectionRegistry, InMemoryRoomRepository};
