pub mod card;
pub mod deck;
pub mod deck_set;
pub mod shuffle;
pub mod study_session;

pub use card::{Card, CardField};
pub use deck::{Deck, DeckId};
pub use deck_set::DeckSet;
pub use shuffle::shuffled;
pub use study_session::{Phase, Reveal, StudySession};
