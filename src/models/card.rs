use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

/// Rarity class printed on a card.
///
/// `D1`..`D4` are the regular (diamond) tiers; the star and crown tiers
/// are grouped together as "secret" rarities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    D1,
    D2,
    D3,
    D4,
    S1,
    S2,
    S3,
    C1,
}

impl Rarity {
    pub const ALL: [Rarity; 8] = [
        Rarity::D1,
        Rarity::D2,
        Rarity::D3,
        Rarity::D4,
        Rarity::S1,
        Rarity::S2,
        Rarity::S3,
        Rarity::C1,
    ];

    /// The four regular tiers, in ascending order.
    pub const REGULAR: [Rarity; 4] = [Rarity::D1, Rarity::D2, Rarity::D3, Rarity::D4];

    /// Catalog code, e.g. `"d3"`.
    pub fn code(self) -> &'static str {
        match self {
            Rarity::D1 => "d1",
            Rarity::D2 => "d2",
            Rarity::D3 => "d3",
            Rarity::D4 => "d4",
            Rarity::S1 => "s1",
            Rarity::S2 => "s2",
            Rarity::S3 => "s3",
            Rarity::C1 => "c1",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rarity::D1 => "◆",
            Rarity::D2 => "◆◆",
            Rarity::D3 => "◆◆◆",
            Rarity::D4 => "◆◆◆◆",
            Rarity::S1 => "★",
            Rarity::S2 => "★★",
            Rarity::S3 => "★★★",
            Rarity::C1 => "♚",
        }
    }

    /// True for the diamond tiers.
    pub fn is_regular(self) -> bool {
        self.tier().is_some()
    }

    /// Zero-based position among the regular tiers, `None` for secret rarities.
    pub fn tier(self) -> Option<usize> {
        Rarity::REGULAR.iter().position(|r| *r == self)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rarity {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| TrackerError::InvalidArgument(format!("Unknown rarity code: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// CardType
// ---------------------------------------------------------------------------

/// Card type, stored in the catalog as an integer code 0..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Colorless,
    Grass,
    Fire,
    Water,
    Lightning,
    Fighting,
    Psychic,
    Darkness,
    Metal,
    Dragon,
    Supporter,
    Item,
    Tool,
}

impl CardType {
    pub const ALL: [CardType; 13] = [
        CardType::Colorless,
        CardType::Grass,
        CardType::Fire,
        CardType::Water,
        CardType::Lightning,
        CardType::Fighting,
        CardType::Psychic,
        CardType::Darkness,
        CardType::Metal,
        CardType::Dragon,
        CardType::Supporter,
        CardType::Item,
        CardType::Tool,
    ];

    pub fn from_code(code: u8) -> Option<CardType> {
        CardType::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            CardType::Colorless => "Colorless",
            CardType::Grass => "Grass",
            CardType::Fire => "Fire",
            CardType::Water => "Water",
            CardType::Lightning => "Lightning",
            CardType::Fighting => "Fighting",
            CardType::Psychic => "Psychic",
            CardType::Darkness => "Darkness",
            CardType::Metal => "Metal",
            CardType::Dragon => "Dragon",
            CardType::Supporter => "Supporter",
            CardType::Item => "Item",
            CardType::Tool => "Tool",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// A catalog card. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    /// Collector number, unique within the owning set.
    pub number: u32,
    pub rarity: Rarity,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub set_code: String,
    /// Names of the boosters this card can be pulled from. Empty means
    /// every booster of the set.
    pub boosters: Vec<String>,
}

impl Card {
    /// True if the card can be pulled from the named booster.
    pub fn in_booster(&self, booster: &str) -> bool {
        self.boosters.is_empty() || self.boosters.iter().any(|b| b == booster)
    }

    /// Collector number as printed, e.g. `#007`.
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.number)
    }
}

// ---------------------------------------------------------------------------
// CardRecord: card entry of the catalog document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub number: u32,
    pub rarity: String,
    #[serde(rename = "type")]
    pub type_code: u8,
    /// Each character is a decimal index into the set's booster list.
    #[serde(default)]
    pub boosters: String,
}
