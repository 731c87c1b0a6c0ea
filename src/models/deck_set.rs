//! Container for all available decks
use super::{Deck, DeckId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeckSet {
    pub decks: Vec<Deck>,
}

impl DeckSet {
    pub fn new(decks: Vec<Deck>) -> Self {
        Self { decks }
    }

    /// Appends an empty deck. Blank names are rejected; duplicate names are not.
    pub fn create_deck(&mut self, name: &str) -> Option<DeckId> {
        if name.trim().is_empty() {
            return None;
        }
        let deck = Deck::new(name);
        let id = deck.id;
        self.decks.push(deck);
        Some(id)
    }

    pub fn delete_deck(&mut self, id: DeckId) -> Option<Deck> {
        let position = self.decks.iter().position(|d| d.id == id)?;
        Some(self.decks.remove(position))
    }

    /// Removes every deck carrying `name` and returns how many were dropped.
    pub fn delete_decks_named(&mut self, name: &str) -> usize {
        let before = self.decks.len();
        self.decks.retain(|d| d.name != name);
        before - self.decks.len()
    }

    pub fn find(&self, id: DeckId) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == id)
    }

    /// First deck with this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.name == name)
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.decks.iter().filter(|d| d.name == name).count()
    }

    /// Swaps in a new value for the deck with the same id.
    pub fn replace(&mut self, deck: Deck) -> bool {
        match self.decks.iter_mut().find(|d| d.id == deck.id) {
            Some(slot) => {
                *slot = deck;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}
