use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardRecord, CardType};

// ---------------------------------------------------------------------------
// Booster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booster {
    pub name: String,
    /// Single-letter code assigned by position (`A`, `B`, ...).
    pub code: char,
    /// Type of the first catalog card named like the booster.
    pub inferred_type: Option<CardType>,
}

// ---------------------------------------------------------------------------
// Set: a release grouping of cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub name: String,
    pub code: String,
    pub release_date: NaiveDate,
    pub cards: Vec<Card>,
    pub boosters: Vec<Booster>,
}

impl Set {
    pub fn card(&self, number: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.number == number)
    }

    pub fn booster(&self, name: &str) -> Option<&Booster> {
        self.boosters.iter().find(|b| b.name == name)
    }

    /// Inferred type of the only booster a card is tagged with.
    ///
    /// Returns `None` for cards available in several (or all) boosters.
    pub fn exclusive_booster_type(&self, card: &Card) -> Option<CardType> {
        match card.boosters.as_slice() {
            [only] => self.booster(only).and_then(|b| b.inferred_type),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SetRecord: set entry of the catalog document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecord {
    pub name: String,
    pub code: String,
    pub release_date: String,
    #[serde(default)]
    pub boosters: Vec<String>,
    #[serde(default)]
    pub cards: Vec<CardRecord>,
}
