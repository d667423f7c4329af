//! In-memory store implementations backed by `HashMap` + `Mutex`.

mod registry;
mod room;

pub use registry::InMemoryConnectionRegistry;
pub use room::InMemoryRoomRepository;
