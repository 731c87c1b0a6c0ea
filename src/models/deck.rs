//! Deck is a named, ordered list of cards
use super::{Card, CardField};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a deck. Names are display text only and may repeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(Uuid);

impl DeckId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DeckId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: &str) -> Self {
        Self {
            id: DeckId::new(),
            name: name.to_string(),
            cards: Vec::new(),
        }
    }

    /// Appends a card with all fields empty.
    pub fn add_card(&mut self) {
        self.cards.push(Card::default());
    }

    /// Sets one field of the card at `index`. Out-of-bounds indices are ignored.
    pub fn update_card(&mut self, index: usize, field: CardField, value: &str) -> bool {
        match self.cards.get_mut(index) {
            Some(card) => {
                card.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Removes the card at `index`, leaving the deck untouched when out of range.
    pub fn delete_card(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_card_appends_blank() {
        let mut deck = Deck::new("HSK2");
        deck.add_card();

        assert_eq!(deck.cards, vec![Card::default()]);
    }

    #[test]
    fn test_update_card() {
        let mut deck = Deck::new("HSK2");
        deck.add_card();

        assert!(deck.update_card(0, CardField::English, "hello"));
        assert_eq!(deck.cards[0], Card::new("hello", "", ""));
    }

    #[test]
    fn test_update_card_out_of_bounds_is_noop() {
        let mut deck = Deck::new("HSK2");
        deck.add_card();
        let before = deck.clone();

        assert!(!deck.update_card(1, CardField::Pinyin, "hǎo"));
        assert_eq!(deck, before);
    }

    #[test]
    fn test_delete_card() {
        let mut deck = Deck::new("HSK1");
        deck.cards = vec![Card::new("one", "yī", "一"), Card::new("two", "èr", "二")];

        let removed = deck.delete_card(0);

        assert_eq!(removed, Some(Card::new("one", "yī", "一")));
        assert_eq!(deck.cards, vec![Card::new("two", "èr", "二")]);
    }

    #[test]
    fn test_delete_card_out_of_range_is_noop() {
        let mut deck = Deck::new("HSK1");
        deck.cards = vec![Card::new("one", "yī", "一")];

        assert_eq!(deck.delete_card(3), None);
        assert_eq!(deck.cards.len(), 1);
    }

    #[test]
    fn test_new_decks_get_distinct_ids() {
        let a = Deck::new("Same");
        let b = Deck::new("Same");

        assert_ne!(a.id, b.id);
    }
}
