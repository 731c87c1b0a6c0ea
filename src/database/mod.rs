pub mod deck_store;
pub mod storage;

pub use deck_store::DeckStore;
pub use storage::{MemoryStorage, SqliteStorage, Storage};
