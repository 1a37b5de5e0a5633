//! Card catalog loading.
//!
//! The catalog is an external JSON document listing every set with its
//! boosters and cards. It is read once at startup, validated, and never
//! mutated afterwards. Sources can be an in-memory string, a reader, a local
//! file (gzip-compressed files are decoded transparently) or an HTTP URL.

use crate::error::{Result, TrackerError};
use crate::models::{Booster, Card, CardRecord, CardType, Rarity, Set, SetRecord};
use chrono::{DateTime, NaiveDate};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::collections::HashSet;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Json(String),
    Path(PathBuf),
    Url(String),
}

/// The read-only card catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Sets in catalog load order (oldest first).
    sets: Vec<Set>,
}

impl Catalog {
    /// Load a catalog from any supported source.
    pub fn load(source: &CatalogSource, timeout: Duration) -> Result<Self> {
        let result = match source {
            CatalogSource::Json(json) => Self::from_json_str(json),
            CatalogSource::Path(path) => Self::from_path(path),
            CatalogSource::Url(url) => Self::fetch(url, timeout),
        };
        if let Err(ref e) = result {
            log::error!("Error loading card data: {}", e);
        }
        result
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<SetRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<SetRecord> = serde_json::from_reader(BufReader::new(reader))?;
        Self::from_records(records)
    }

    /// Load a catalog file (handles `.gz` transparently).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            Self::from_reader(GzDecoder::new(BufReader::new(file)))
        } else {
            Self::from_reader(file)
        }
    }

    /// Download and parse the catalog document.
    pub fn fetch(url: &str, timeout: Duration) -> Result<Self> {
        log::debug!("Fetching catalog from {}", url);
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        let records: Vec<SetRecord> = client.get(url).send()?.error_for_status()?.json()?;
        Self::from_records(records)
    }

    /// Validate raw catalog records and join them into the catalog model.
    ///
    /// Booster types are inferred after every card is known, since the
    /// signature card of a booster may live in another set.
    pub fn from_records(records: Vec<SetRecord>) -> Result<Self> {
        let mut sets = Vec::with_capacity(records.len());
        for record in records {
            sets.push(convert_set(record)?);
        }

        let inferred: Vec<Vec<Option<CardType>>> = sets
            .iter()
            .map(|set| {
                set.boosters
                    .iter()
                    .map(|b| signature_type(&sets, &b.name))
                    .collect()
            })
            .collect();
        for (set, types) in sets.iter_mut().zip(inferred) {
            for (booster, inferred_type) in set.boosters.iter_mut().zip(types) {
                booster.inferred_type = inferred_type;
            }
        }

        Ok(Self { sets })
    }

    /// Sets, newest release first (reverse of load order).
    pub fn sets(&self) -> impl DoubleEndedIterator<Item = &Set> + '_ {
        self.sets.iter().rev()
    }

    /// Look up a set by code (case-insensitive).
    pub fn set(&self, code: &str) -> Option<&Set> {
        self.sets.iter().find(|s| s.code.eq_ignore_ascii_case(code))
    }

    pub fn card(&self, set_code: &str, number: u32) -> Option<&Card> {
        self.set(set_code).and_then(|s| s.card(number))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Total number of cards across every set.
    pub fn card_count(&self) -> usize {
        self.sets.iter().map(|s| s.cards.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Card membership strings index boosters with single decimal digits.
const MAX_BOOSTERS_PER_SET: usize = 10;

fn convert_set(record: SetRecord) -> Result<Set> {
    let release_date = parse_release_date(&record.release_date).ok_or_else(|| {
        TrackerError::InvalidCatalog(format!(
            "set {} has an unreadable release date '{}'",
            record.code, record.release_date
        ))
    })?;

    if record.boosters.len() > MAX_BOOSTERS_PER_SET {
        return Err(TrackerError::InvalidCatalog(format!(
            "set {} lists {} boosters; at most {} are supported",
            record.code,
            record.boosters.len(),
            MAX_BOOSTERS_PER_SET
        )));
    }
    let boosters: Vec<Booster> = record
        .boosters
        .iter()
        .zip('A'..='Z')
        .map(|(name, code)| Booster {
            name: name.clone(),
            code,
            inferred_type: None,
        })
        .collect();

    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(record.cards.len());
    for card in &record.cards {
        if card.number == 0 || !seen.insert(card.number) {
            return Err(TrackerError::InvalidCatalog(format!(
                "set {} has an invalid or duplicate card number {}",
                record.code, card.number
            )));
        }
        cards.push(convert_card(card, &record.code, &record.boosters)?);
    }

    Ok(Set {
        name: record.name,
        code: record.code,
        release_date,
        cards,
        boosters,
    })
}

fn convert_card(record: &CardRecord, set_code: &str, booster_names: &[String]) -> Result<Card> {
    let rarity: Rarity = record.rarity.parse().map_err(|_| {
        TrackerError::InvalidCatalog(format!(
            "card {}#{} has unknown rarity '{}'",
            set_code, record.number, record.rarity
        ))
    })?;
    let card_type = CardType::from_code(record.type_code).ok_or_else(|| {
        TrackerError::InvalidCatalog(format!(
            "card {}#{} has unknown type code {}",
            set_code, record.number, record.type_code
        ))
    })?;

    let mut boosters: Vec<String> = Vec::new();
    for ch in record.boosters.chars() {
        let name = ch
            .to_digit(10)
            .and_then(|i| booster_names.get(i as usize))
            .ok_or_else(|| {
                TrackerError::InvalidCatalog(format!(
                    "card {}#{} references unknown booster '{}'",
                    set_code, record.number, ch
                ))
            })?;
        if !boosters.contains(name) {
            boosters.push(name.clone());
        }
    }

    Ok(Card {
        name: record.name.clone(),
        number: record.number,
        rarity,
        card_type,
        set_code: set_code.to_string(),
        boosters,
    })
}

fn signature_type(sets: &[Set], booster_name: &str) -> Option<CardType> {
    sets.iter()
        .flat_map(|s| s.cards.iter())
        .find(|c| c.name == booster_name)
        .map(|c| c.card_type)
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_date_accepts_plain_and_rfc3339() {
        assert_eq!(
            parse_release_date("2024-10-30"),
            NaiveDate::from_ymd_opt(2024, 10, 30)
        );
        assert_eq!(
            parse_release_date("2024-12-17T00:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 12, 17)
        );
        assert_eq!(parse_release_date("soon"), None);
    }
}
