pub mod connection;
pub mod entities;
pub mod repositories;
pub mod store;

pub use repositories::{GameHistoryRepository, HISTORY_KEY};
pub use store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
