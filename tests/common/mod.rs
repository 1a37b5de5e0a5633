//! Shared test fixtures for the pocketdex integration tests.
//!
//! Provides a small two-set catalog: `A1` with three boosters and `A1a`
//! with a single booster whose signature card lives in `A1`.

use pocketdex::Catalog;

/// Catalog document in load order (oldest set first).
///
/// A1 boosters: 0 = Mewtwo, 1 = Charizard, 2 = Pikachu.
pub const CATALOG_JSON: &str = r#"[
  {
    "name": "Genetic Apex",
    "code": "A1",
    "releaseDate": "2024-10-30",
    "boosters": ["Mewtwo", "Charizard", "Pikachu"],
    "cards": [
      { "name": "Bulbasaur",  "number": 1, "rarity": "d1", "type": 1,  "boosters": "1" },
      { "name": "Pikachu",    "number": 2, "rarity": "d1", "type": 4,  "boosters": "2" },
      { "name": "Charizard",  "number": 3, "rarity": "d3", "type": 2,  "boosters": "1" },
      { "name": "Mewtwo",     "number": 4, "rarity": "d3", "type": 6,  "boosters": "0" },
      { "name": "Poke Ball",  "number": 5, "rarity": "d1", "type": 11, "boosters": "" },
      { "name": "Mewtwo ex",  "number": 6, "rarity": "d4", "type": 6,  "boosters": "0" },
      { "name": "Pikachu ex", "number": 7, "rarity": "s1", "type": 4,  "boosters": "2" },
      { "name": "Mew",        "number": 8, "rarity": "c1", "type": 6,  "boosters": "01" }
    ]
  },
  {
    "name": "Mythical Island",
    "code": "A1a",
    "releaseDate": "2024-12-17",
    "boosters": ["Mew"],
    "cards": [
      { "name": "Exeggcute", "number": 1, "rarity": "d1", "type": 1, "boosters": "" },
      { "name": "Mew ex",    "number": 2, "rarity": "s2", "type": 6, "boosters": "" },
      { "name": "Celebi ex", "number": 3, "rarity": "d4", "type": 1 }
    ]
  }
]"#;

pub fn sample_catalog() -> Catalog {
    Catalog::from_json_str(CATALOG_JSON).unwrap()
}

/// Single-set catalog with the given `(number, rarity)` cards and no boosters.
pub fn catalog_with_rarities(cards: &[(u32, &str)]) -> Catalog {
    let cards: Vec<serde_json::Value> = cards
        .iter()
        .map(|(number, rarity)| {
            serde_json::json!({
                "name": format!("Card {}", number),
                "number": number,
                "rarity": rarity,
                "type": 0
            })
        })
        .collect();
    let doc = serde_json::json!([{
        "name": "Test Set",
        "code": "T",
        "releaseDate": "2025-01-01",
        "boosters": [],
        "cards": cards
    }]);
    Catalog::from_json_str(&doc.to_string()).unwrap()
}
