//! Card is a vocabulary entry: English meaning, Pinyin reading and Hanzi character(s).
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub character: String,
}

/// Names one of the three text fields of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardField {
    English,
    Pinyin,
    Character,
}

impl CardField {
    pub const ALL: [CardField; 3] = [CardField::English, CardField::Pinyin, CardField::Character];

    pub fn as_str(self) -> &'static str {
        match self {
            CardField::English => "english",
            CardField::Pinyin => "pinyin",
            CardField::Character => "character",
        }
    }

    /// Placeholder shown in an empty editor input.
    pub fn label(self) -> &'static str {
        match self {
            CardField::English => "English",
            CardField::Pinyin => "Pinyin",
            CardField::Character => "Character",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(CardField::English),
            "pinyin" => Ok(CardField::Pinyin),
            "character" => Ok(CardField::Character),
            other => Err(format!("unknown card field '{}'", other)),
        }
    }
}

impl Card {
    pub fn new(english: &str, pinyin: &str, character: &str) -> Self {
        Self {
            english: english.to_string(),
            pinyin: pinyin.to_string(),
            character: character.to_string(),
        }
    }

    pub fn get(&self, field: CardField) -> &str {
        match field {
            CardField::English => &self.english,
            CardField::Pinyin => &self.pinyin,
            CardField::Character => &self.character,
        }
    }

    pub fn get_mut(&mut self, field: CardField) -> &mut String {
        match field {
            CardField::English => &mut self.english,
            CardField::Pinyin => &mut self.pinyin,
            CardField::Character => &mut self.character,
        }
    }

    pub fn set(&mut self, field: CardField, value: &str) {
        *self.get_mut(field) = value.to_string();
    }
}
