//! Study session: a shuffled pass over one deck with a three-step reveal per card.
//!
//! Each card is shown in three phases (English, then Pinyin, then Character). Moving
//! past the Character phase goes to the next card's English phase; moving back from
//! English goes to the previous card's Character phase. The first card's English phase
//! and the last card's Character phase are the two ends of the walk.

use super::shuffle::shuffled;
use super::{Card, Deck};
use crate::error::SessionError;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    English,
    Pinyin,
    Character,
}

impl Phase {
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::English => Some(Phase::Pinyin),
            Phase::Pinyin => Some(Phase::Character),
            Phase::Character => None,
        }
    }

    pub fn prev(self) -> Option<Phase> {
        match self {
            Phase::English => None,
            Phase::Pinyin => Some(Phase::English),
            Phase::Character => Some(Phase::Pinyin),
        }
    }
}

/// What the current card shows in the current phase. Reveal is cumulative.
#[derive(Debug, PartialEq, Eq)]
pub struct Reveal<'a> {
    pub english: &'a str,
    pub pinyin: Option<&'a str>,
    pub character: Option<&'a str>,
}

pub struct StudySession {
    deck_name: String,
    order: Vec<Card>,
    current_index: usize,
    phase: Phase,
}

impl StudySession {
    /// Starts a session over a freshly shuffled copy of the deck's cards.
    pub fn start(deck: &Deck) -> Result<Self, SessionError> {
        Self::start_with_rng(deck, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(deck: &Deck, rng: &mut R) -> Result<Self, SessionError> {
        Self::from_order(&deck.name, shuffled(&deck.cards, rng))
    }

    /// Builds a session over a fixed presentation order.
    pub fn from_order(deck_name: &str, order: Vec<Card>) -> Result<Self, SessionError> {
        if order.is_empty() {
            return Err(SessionError::EmptyDeck(deck_name.to_string()));
        }
        log::debug!("Session started on '{}' with {} cards", deck_name, order.len());
        Ok(Self {
            deck_name: deck_name.to_string(),
            order,
            current_index: 0,
            phase: Phase::English,
        })
    }

    /// Moves one step forward. Returns false at the last card's Character phase.
    pub fn advance(&mut self) -> bool {
        if let Some(phase) = self.phase.next() {
            self.phase = phase;
            return true;
        }
        if self.current_index + 1 < self.order.len() {
            self.current_index += 1;
            self.phase = Phase::English;
            return true;
        }
        false
    }

    /// Moves one step back. Returns false at the first card's English phase.
    pub fn retreat(&mut self) -> bool {
        if let Some(phase) = self.phase.prev() {
            self.phase = phase;
            return true;
        }
        if self.current_index > 0 {
            self.current_index -= 1;
            self.phase = Phase::Character;
            return true;
        }
        false
    }

    pub fn can_advance(&self) -> bool {
        !(self.current_index + 1 == self.order.len() && self.phase == Phase::Character)
    }

    pub fn can_retreat(&self) -> bool {
        self.current_index > 0 || self.phase != Phase::English
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn order(&self) -> &[Card] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn current_card(&self) -> &Card {
        // current_index is kept within 0..order.len() and order is never empty
        &self.order[self.current_index]
    }

    pub fn reveal(&self) -> Reveal<'_> {
        let card = self.current_card();
        Reveal {
            english: &card.english,
            pinyin: (self.phase != Phase::English).then_some(card.pinyin.as_str()),
            character: (self.phase == Phase::Character).then_some(card.character.as_str()),
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.current_index + 1, self.order.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(&format!("word {}", i), &format!("py {}", i), &format!("字{}", i)))
            .collect()
    }

    fn state(session: &StudySession) -> (usize, Phase) {
        (session.current_index(), session.phase())
    }

    #[test]
    fn test_initial_state() {
        let session = StudySession::from_order("HSK1", cards(3)).unwrap();

        assert_eq!(state(&session), (0, Phase::English));
        assert!(!session.can_retreat());
        assert!(session.can_advance());
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let deck = Deck::new("Empty");

        assert_eq!(
            StudySession::start(&deck).err(),
            Some(SessionError::EmptyDeck("Empty".to_string()))
        );
    }

    #[test]
    fn test_phase_cycle_does_not_skip_pinyin() {
        let mut session = StudySession::from_order("HSK1", cards(2)).unwrap();

        session.advance();
        assert_eq!(state(&session), (0, Phase::Pinyin));
        session.advance();
        assert_eq!(state(&session), (0, Phase::Character));
        session.advance();
        assert_eq!(state(&session), (1, Phase::English));
    }

    #[test]
    fn test_single_card_stops_at_character() {
        let mut session = StudySession::from_order("Solo", cards(1)).unwrap();

        for _ in 0..3 {
            session.advance();
        }
        assert_eq!(state(&session), (0, Phase::Character));
        assert!(!session.advance());
        assert_eq!(state(&session), (0, Phase::Character));
    }

    #[test]
    fn test_retreat_at_start_is_noop() {
        let mut session = StudySession::from_order("HSK1", cards(2)).unwrap();

        assert!(!session.retreat());
        assert_eq!(state(&session), (0, Phase::English));
    }

    #[test]
    fn test_two_cards_seven_steps_reach_the_end() {
        let mut session = StudySession::from_order("HSK1", cards(2)).unwrap();

        let moved = (0..7).filter(|_| session.advance()).count();

        // 3 steps on card 0 including the jump, 2 more on card 1, then the end is hit
        assert_eq!(moved, 5);
        assert_eq!(state(&session), (1, Phase::Character));
        assert!(!session.can_advance());
        assert!(!session.advance());
        assert_eq!(state(&session), (1, Phase::Character));
    }

    #[test]
    fn test_retreat_is_inverse_of_advance() {
        let mut session = StudySession::from_order("HSK1", cards(3)).unwrap();
        let mut trail = vec![state(&session)];
        while session.advance() {
            trail.push(state(&session));
        }
        assert_eq!(trail.len(), 9);

        trail.pop();
        while let Some(expected) = trail.pop() {
            assert!(session.retreat());
            assert_eq!(state(&session), expected);
        }
        assert!(!session.retreat());
    }

    #[test]
    fn test_retreat_across_card_boundary_shows_character() {
        let mut session = StudySession::from_order("HSK1", cards(2)).unwrap();
        for _ in 0..3 {
            session.advance();
        }
        assert_eq!(state(&session), (1, Phase::English));

        session.retreat();
        assert_eq!(state(&session), (0, Phase::Character));
    }

    #[test]
    fn test_reveal_is_cumulative() {
        let order = vec![Card::new("hello", "nǐ hǎo", "你好")];
        let mut session = StudySession::from_order("HSK1", order).unwrap();

        assert_eq!(
            session.reveal(),
            Reveal {
                english: "hello",
                pinyin: None,
                character: None,
            }
        );
        session.advance();
        assert_eq!(
            session.reveal(),
            Reveal {
                english: "hello",
                pinyin: Some("nǐ hǎo"),
                character: None,
            }
        );
        session.advance();
        assert_eq!(
            session.reveal(),
            Reveal {
                english: "hello",
                pinyin: Some("nǐ hǎo"),
                character: Some("你好"),
            }
        );
    }

    #[test]
    fn test_start_shuffles_a_copy() {
        let mut deck = Deck::new("HSK1");
        deck.cards = cards(10);
        let snapshot = deck.cards.clone();
        let mut rng = StdRng::seed_from_u64(5);

        let session = StudySession::start_with_rng(&deck, &mut rng).unwrap();

        assert_eq!(deck.cards, snapshot);
        assert_eq!(session.len(), 10);
        let mut seen: Vec<_> = session.order().iter().map(|c| c.english.clone()).collect();
        seen.sort();
        let mut expected: Vec<_> = snapshot.iter().map(|c| c.english.clone()).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_progress_label() {
        let mut session = StudySession::from_order("HSK1", cards(4)).unwrap();
        assert_eq!(session.progress_label(), "1/4");

        for _ in 0..3 {
            session.advance();
        }
        assert_eq!(session.progress_label(), "2/4");
    }
}
