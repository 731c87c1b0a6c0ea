//! Deck store: loads, mutates and persists the deck collection.
//!
//! All persisted state goes through [`DeckStore`]. The collection is stored as one JSON
//! array under [`DECKS_KEY`] and rewritten in full on every mutation. The older single
//! deck layout (a bare array of cards under [`LEGACY_CARDS_KEY`]) can still be read and
//! migrated into a named deck.

use super::storage::Storage;
use crate::error::Result;
use crate::models::{Card, CardField, Deck, DeckId, DeckSet};
use serde::Deserialize;

pub const DECKS_KEY: &str = "flashcardDecks";
pub const LEGACY_CARDS_KEY: &str = "flashcards";
/// Unreadable deck data is parked here before the store falls back to an empty collection.
pub const CORRUPT_DECKS_KEY: &str = "flashcardDecks.corrupt";

/// On-disk shape of a deck. Older data carries no `id`.
#[derive(Deserialize)]
struct StoredDeck {
    #[serde(default)]
    id: Option<DeckId>,
    name: String,
    #[serde(default)]
    cards: Vec<Card>,
}

impl StoredDeck {
    fn into_deck(self) -> Deck {
        Deck {
            id: self.id.unwrap_or_default(),
            name: self.name,
            cards: self.cards,
        }
    }
}

pub struct DeckStore<S: Storage> {
    storage: S,
}

impl<S: Storage> DeckStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted collection.
    ///
    /// Missing data is an empty collection. Data that does not match the deck schema is
    /// copied to [`CORRUPT_DECKS_KEY`] and also treated as empty. Decks saved without an
    /// id are given one and the collection is written back straight away. Only a failed
    /// read is an error; those write-backs are best effort.
    pub fn load(&mut self) -> Result<DeckSet> {
        let Some(raw) = self.storage.get_item(DECKS_KEY)? else {
            log::debug!("No saved decks, starting empty");
            return Ok(DeckSet::default());
        };

        match serde_json::from_str::<Vec<StoredDeck>>(&raw) {
            Ok(stored) => {
                let missing_ids = stored.iter().filter(|d| d.id.is_none()).count();
                let decks = DeckSet::new(stored.into_iter().map(StoredDeck::into_deck).collect());
                if missing_ids > 0 {
                    log::info!("Assigned ids to {} saved deck(s)", missing_ids);
                    if let Err(e) = self.save(&decks) {
                        log::warn!("Could not write back deck ids: {}", e);
                    }
                }
                log::debug!("Loaded {} decks", decks.len());
                Ok(decks)
            }
            Err(e) => {
                log::warn!(
                    "Saved decks are unreadable ({}), keeping a copy under '{}' and starting empty",
                    e,
                    CORRUPT_DECKS_KEY
                );
                if let Err(e) = self.storage.set_item(CORRUPT_DECKS_KEY, &raw) {
                    log::warn!("Could not keep a copy of unreadable decks: {}", e);
                }
                Ok(DeckSet::default())
            }
        }
    }

    /// Overwrites the persisted collection.
    pub fn save(&mut self, decks: &DeckSet) -> Result<()> {
        let json = serde_json::to_string(&decks.decks)?;
        self.storage.set_item(DECKS_KEY, &json)
    }

    /// Persists `next` and only then makes it the live collection.
    fn commit(&mut self, decks: &mut DeckSet, next: DeckSet) -> Result<()> {
        self.save(&next)?;
        *decks = next;
        Ok(())
    }

    pub fn create_deck(&mut self, decks: &mut DeckSet, name: &str) -> Result<Option<DeckId>> {
        let mut next = decks.clone();
        let Some(id) = next.create_deck(name) else {
            log::debug!("Ignoring deck with empty name");
            return Ok(None);
        };
        self.commit(decks, next)?;
        log::debug!("Created deck '{}' ({})", name, id);
        Ok(Some(id))
    }

    /// Appends an already built deck, e.g. one read from a file.
    pub fn insert_deck(&mut self, decks: &mut DeckSet, deck: Deck) -> Result<DeckId> {
        let id = deck.id;
        let mut next = decks.clone();
        next.decks.push(deck);
        self.commit(decks, next)?;
        Ok(id)
    }

    pub fn delete_deck(&mut self, decks: &mut DeckSet, id: DeckId) -> Result<Option<Deck>> {
        let mut next = decks.clone();
        let Some(removed) = next.delete_deck(id) else {
            return Ok(None);
        };
        self.commit(decks, next)?;
        log::debug!("Deleted deck '{}' ({})", removed.name, id);
        Ok(Some(removed))
    }

    /// Removes every deck named `name`. Returns how many were removed.
    pub fn delete_decks_named(&mut self, decks: &mut DeckSet, name: &str) -> Result<usize> {
        let mut next = decks.clone();
        let removed = next.delete_decks_named(name);
        if removed > 0 {
            self.commit(decks, next)?;
        }
        Ok(removed)
    }

    pub fn add_card(&mut self, decks: &mut DeckSet, id: DeckId) -> Result<bool> {
        let outcome = self.update_deck(decks, id, |deck| {
            deck.add_card();
            Some(())
        })?;
        Ok(outcome.is_some())
    }

    pub fn update_card(
        &mut self,
        decks: &mut DeckSet,
        id: DeckId,
        index: usize,
        field: CardField,
        value: &str,
    ) -> Result<bool> {
        let outcome = self.update_deck(decks, id, |deck| {
            deck.update_card(index, field, value).then_some(())
        })?;
        Ok(outcome.is_some())
    }

    pub fn delete_card(
        &mut self,
        decks: &mut DeckSet,
        id: DeckId,
        index: usize,
    ) -> Result<Option<Card>> {
        self.update_deck(decks, id, |deck| deck.delete_card(index))
    }

    /// Edits a copy of one deck, swaps it into the collection and persists the whole
    /// collection. `edit` returning `None` means nothing changed and nothing is written.
    fn update_deck<T>(
        &mut self,
        decks: &mut DeckSet,
        id: DeckId,
        edit: impl FnOnce(&mut Deck) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(mut deck) = decks.find(id).cloned() else {
            log::warn!("No deck with id {}", id);
            return Ok(None);
        };
        let Some(outcome) = edit(&mut deck) else {
            return Ok(None);
        };
        let mut next = decks.clone();
        next.replace(deck);
        self.commit(decks, next)?;
        Ok(Some(outcome))
    }

    /// Cards saved by the single-deck editor. Unreadable data reads as no cards.
    pub fn load_legacy_cards(&self) -> Result<Vec<Card>> {
        let Some(raw) = self.storage.get_item(LEGACY_CARDS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(cards) => Ok(cards),
            Err(e) => {
                log::warn!("Legacy cards are unreadable: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub fn save_legacy_cards(&mut self, cards: &[Card]) -> Result<()> {
        let json = serde_json::to_string(cards)?;
        self.storage.set_item(LEGACY_CARDS_KEY, &json)
    }

    /// Copies legacy cards into a new deck called `name`.
    ///
    /// Nothing happens when there are no legacy cards or a deck with that name already
    /// exists, so running this on every start is safe. The legacy key is left untouched.
    pub fn migrate_legacy_cards(
        &mut self,
        decks: &mut DeckSet,
        name: &str,
    ) -> Result<Option<DeckId>> {
        let cards = self.load_legacy_cards()?;
        if cards.is_empty() || decks.find_by_name(name).is_some() {
            return Ok(None);
        }
        let mut deck = Deck::new(name);
        deck.cards = cards;
        let id = self.insert_deck(decks, deck)?;
        log::info!("Migrated legacy cards into deck '{}'", name);
        Ok(Some(id))
    }
}
