//! JSON import/export of single decks.
//! A deck file holds `{ "name": ..., "cards": [...] }`; ids are not written out.

use crate::error::Result;
use crate::models::{Card, Deck};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct DeckFile {
    name: String,
    #[serde(default)]
    cards: Vec<Card>,
}

/// Exports a deck to a pretty-printed JSON file at `path`.
pub fn export_json_to_path(deck: &Deck, path: &Path) -> Result<()> {
    let file = DeckFile {
        name: deck.name.clone(),
        cards: deck.cards.clone(),
    };
    let json_string = serde_json::to_string_pretty(&file)?;
    let mut out = File::create(path)?;
    out.write_all(json_string.as_bytes())?;
    log::info!("Deck '{}' exported to '{}'", deck.name, path.display());
    Ok(())
}

/// Imports a deck from a JSON file. The deck always gets a fresh id.
pub fn import_json(path: &Path) -> Result<Deck> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let parsed: DeckFile = serde_json::from_str(&contents)?;
    let mut deck = Deck::new(&parsed.name);
    deck.cards = parsed.cards;

    log::info!("Deck '{}' imported from '{}'", deck.name, path.display());
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_deck() -> Deck {
        let mut deck = Deck::new("Test Deck");
        deck.cards = vec![
            Card::new("hello", "nǐ hǎo", "你好"),
            Card::new("thank you", "xiè xie", "谢谢"),
        ];
        deck
    }

    #[test]
    fn test_export_json_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");

        export_json_to_path(&create_test_deck(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"name\": \"Test Deck\""));
        assert!(!written.contains("\"id\""));
    }

    #[test]
    fn test_import_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.json");
        let json_content = r#"{
  "name": "Import Test Deck",
  "cards": [
    {
      "english": "water",
      "pinyin": "shuǐ",
      "character": "水"
    }
  ]
}"#;
        fs::write(&path, json_content).unwrap();

        let deck = import_json(&path).unwrap();

        assert_eq!(deck.name, "Import Test Deck");
        assert_eq!(deck.cards, vec![Card::new("water", "shuǐ", "水")]);
    }

    #[test]
    fn test_export_and_import_gives_new_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.json");
        let original = create_test_deck();

        export_json_to_path(&original, &path).unwrap();
        let imported = import_json(&path).unwrap();

        assert_eq!(imported.name, original.name);
        assert_eq!(imported.cards, original.cards);
        assert_ne!(imported.id, original.id);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_json(Path::new("nonexistent_file_xyz123.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(import_json(&path).is_err());
    }
}
