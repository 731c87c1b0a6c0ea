pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod input;
pub mod models;
pub mod routes;

pub use database::{DeckStore, SqliteStorage, Storage};
pub use models::{Card, CardField, Deck, DeckId, DeckSet, Phase, StudySession};
pub use routes::{Mode, Route};
