//! The count repository: owner of the mutable count mapping.
//!
//! A [`Repository`] wraps a [`CountMap`] plus the last time each set
//! changed, and persists both through its [`Store`] after every mutation.
//! Over a [`ReadOnly`] store every mutating call is ignored.

use crate::codec;
use crate::counts::CountMap;
use crate::error::{Result, TrackerError};
use crate::store::{ReadOnly, Store};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Snapshot: the backing store record
// ---------------------------------------------------------------------------

/// Full-fidelity state of a repository: counts and per-set timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub counts: CountMap,
    #[serde(default)]
    pub modified: IndexMap<String, DateTime<Utc>>,
}

impl Snapshot {
    /// Render as a store record, optionally wrapped in URL-safe base64.
    pub fn encode(&self, obfuscate: bool) -> Result<String> {
        let json = serde_json::to_string(self)?;
        if obfuscate {
            Ok(URL_SAFE_NO_PAD.encode(json))
        } else {
            Ok(json)
        }
    }

    /// Parse a store record.
    ///
    /// Accepts plain and base64-wrapped records, and the older format that
    /// held the bare counts object without timestamps.
    pub fn decode(record: &str) -> Result<Self> {
        let record = record.trim();
        let json = if record.starts_with('{') {
            record.to_string()
        } else {
            let bytes = URL_SAFE_NO_PAD
                .decode(record)
                .map_err(|e| TrackerError::InvalidRecord(format!("bad base64: {}", e)))?;
            String::from_utf8(bytes)
                .map_err(|e| TrackerError::InvalidRecord(format!("bad utf-8: {}", e)))?
        };

        match serde_json::from_str::<Snapshot>(&json) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => match serde_json::from_str::<CountMap>(&json) {
                Ok(counts) => Ok(Snapshot {
                    counts,
                    modified: IndexMap::new(),
                }),
                Err(_) => Err(e.into()),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

pub struct Repository<S: Store> {
    counts: CountMap,
    modified: IndexMap<String, DateTime<Utc>>,
    store: S,
    obfuscate: bool,
}

impl<S: Store> Repository<S> {
    /// Open a repository over `store`, loading whatever it holds.
    ///
    /// A missing record starts an empty collection. A malformed record is
    /// logged and also starts empty; it is overwritten by the next change.
    pub fn open(store: S, obfuscate: bool) -> Result<Self> {
        let snapshot = match store.load()? {
            Some(record) => Snapshot::decode(&record).unwrap_or_else(|e| {
                log::error!("Discarding unreadable collection record: {}", e);
                Snapshot::default()
            }),
            None => Snapshot::default(),
        };
        Ok(Self {
            counts: snapshot.counts,
            modified: snapshot.modified,
            store,
            obfuscate,
        })
    }

    /// Count recorded for a card, 0 if absent.
    pub fn get(&self, set_code: &str, number: u32) -> u32 {
        self.counts.get(set_code, number)
    }

    /// Record a new count for a card and persist the collection.
    ///
    /// Non-positive counts remove the card. Nothing is written when the
    /// count does not change or the repository is read-only. Returns `true`
    /// if the mapping changed.
    pub fn set(&mut self, set_code: &str, number: u32, count: i64) -> bool {
        if !S::WRITABLE {
            log::debug!("Ignoring write to read-only collection: {}#{}", set_code, number);
            return false;
        }
        if !self.counts.set(set_code, number, count) {
            return false;
        }
        log::debug!("{}#{} -> {}", set_code, number, self.counts.get(set_code, number));
        self.modified.insert(set_code.to_string(), Utc::now());
        self.persist();
        true
    }

    /// Full snapshot of counts and timestamps, readable by [`import`](Self::import).
    pub fn export(&self) -> String {
        self.snapshot().encode(self.obfuscate).unwrap_or_else(|e| {
            log::error!("Failed to export collection: {}", e);
            String::new()
        })
    }

    /// Replace the collection with a previously exported snapshot.
    ///
    /// Malformed input is logged and ignored, leaving the current state
    /// untouched. Returns `true` if the snapshot was applied.
    pub fn import(&mut self, record: &str) -> bool {
        if !S::WRITABLE {
            log::debug!("Ignoring import into read-only collection");
            return false;
        }
        match Snapshot::decode(record) {
            Ok(snapshot) => {
                self.counts = snapshot.counts;
                self.modified = snapshot.modified;
                self.persist();
                log::debug!("Imported collection with {} sets", self.counts.len());
                true
            }
            Err(e) => {
                log::error!("Failed to import collection: {}", e);
                false
            }
        }
    }

    /// Compact route encoding of the current counts, for share links.
    pub fn serialize_route(&self) -> String {
        codec::serialize(&self.counts)
    }

    /// Number of distinct cards owned in a set.
    pub fn set_count(&self, set_code: &str) -> usize {
        self.counts.set_count(set_code)
    }

    pub fn last_modified(&self, set_code: &str) -> Option<DateTime<Utc>> {
        self.modified.get(set_code).copied()
    }

    pub fn counts(&self) -> &CountMap {
        &self.counts
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            counts: self.counts.clone(),
            modified: self.modified.clone(),
        }
    }

    pub fn is_read_only(&self) -> bool {
        !S::WRITABLE
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let record = match self.snapshot().encode(self.obfuscate) {
            Ok(record) => record,
            Err(e) => {
                log::error!("Failed to encode collection: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(&record) {
            log::error!("Failed to save collection: {}", e);
        }
    }
}

impl Repository<ReadOnly> {
    /// Read-only repository decoded from a share string.
    pub fn from_route(encoded: &str) -> Self {
        Self {
            counts: codec::deserialize(encoded),
            modified: IndexMap::new(),
            store: ReadOnly,
            obfuscate: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_bare_counts_object() {
        let snapshot = Snapshot::decode(r#"{"A1":{"4":3}}"#).unwrap();
        assert_eq!(snapshot.counts.get("A1", 4), 3);
        assert!(snapshot.modified.is_empty());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(Snapshot::decode("not a record").is_err());
        assert!(Snapshot::decode("[1,2,3]").is_err());
    }
}
