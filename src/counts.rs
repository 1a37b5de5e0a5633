//! Owned-card counts keyed by set code and card number.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Sparse `set code -> card number -> count` mapping.
///
/// A card number is present only while its count is positive and a set
/// code only while it holds at least one card; zero is always represented
/// by absence. Iteration follows insertion order, which keeps the route
/// encoding of a given mapping stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<String, IndexMap<u32, i64>>")]
pub struct CountMap {
    sets: IndexMap<String, IndexMap<u32, u32>>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count recorded for a card, 0 if absent.
    pub fn get(&self, set_code: &str, number: u32) -> u32 {
        self.sets
            .get(set_code)
            .and_then(|cards| cards.get(&number))
            .copied()
            .unwrap_or(0)
    }

    /// Record a count. Non-positive counts remove the card.
    ///
    /// Returns `true` if the mapping changed.
    pub fn set(&mut self, set_code: &str, number: u32, count: i64) -> bool {
        if count > 0 {
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            let cards = self.sets.entry(set_code.to_string()).or_default();
            cards.insert(number, count) != Some(count)
        } else {
            let Some(cards) = self.sets.get_mut(set_code) else {
                return false;
            };
            if cards.shift_remove(&number).is_none() {
                return false;
            }
            if cards.is_empty() {
                self.sets.shift_remove(set_code);
            }
            true
        }
    }

    /// Replace every card of a set, keeping the set's position. Non-positive
    /// counts are dropped and an empty replacement removes the set.
    pub fn replace_set(&mut self, set_code: &str, cards: IndexMap<u32, u32>) {
        let cards: IndexMap<u32, u32> = cards.into_iter().filter(|(_, c)| *c > 0).collect();
        if cards.is_empty() {
            self.sets.shift_remove(set_code);
        } else {
            self.sets.insert(set_code.to_string(), cards);
        }
    }

    /// Number of distinct cards owned in a set.
    pub fn set_count(&self, set_code: &str) -> usize {
        self.sets.get(set_code).map_or(0, |cards| cards.len())
    }

    /// Set codes in insertion order.
    pub fn set_codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.keys().map(|s| s.as_str())
    }

    /// `(number, count)` pairs of a set in insertion order.
    pub fn cards(&self, set_code: &str) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.sets
            .get(set_code)
            .into_iter()
            .flat_map(|cards| cards.iter().map(|(n, c)| (*n, *c)))
    }

    pub fn contains_set(&self, set_code: &str) -> bool {
        self.sets.contains_key(set_code)
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Number of sets holding at least one card.
    pub fn len(&self) -> usize {
        self.sets.len()
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sets.serialize(serializer)
    }
}

impl From<IndexMap<String, IndexMap<u32, i64>>> for CountMap {
    fn from(raw: IndexMap<String, IndexMap<u32, i64>>) -> Self {
        let mut map = CountMap::new();
        for (set_code, cards) in raw {
            for (number, count) in cards {
                map.set(&set_code, number, count);
            }
        }
        map
    }
}

impl<S: Into<String>> FromIterator<(S, u32, u32)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (S, u32, u32)>>(iter: I) -> Self {
        let mut map = CountMap::new();
        for (set_code, number, count) in iter {
            let set_code: String = set_code.into();
            map.set(&set_code, number, i64::from(count));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_removes_card_and_empty_set() {
        let mut map = CountMap::new();
        assert!(map.set("A1", 3, 2));
        assert!(map.set("A1", 3, 0));
        assert_eq!(map.get("A1", 3), 0);
        assert!(!map.contains_set("A1"));
        assert!(!map.set("A1", 3, -4));
    }

    #[test]
    fn same_value_is_not_a_change() {
        let mut map = CountMap::new();
        assert!(map.set("A1", 1, 1));
        assert!(!map.set("A1", 1, 1));
        assert!(map.set("A1", 1, 2));
    }

    #[test]
    fn deserialize_drops_non_positive_counts() {
        let map: CountMap =
            serde_json::from_str(r#"{"A1":{"1":2,"2":0,"3":-1},"B":{}}"#).unwrap();
        assert_eq!(map.get("A1", 1), 2);
        assert_eq!(map.set_count("A1"), 1);
        assert!(!map.contains_set("B"));
    }

    #[test]
    fn insertion_order_is_kept() {
        let map: CountMap = [("B", 1, 1), ("A", 1, 1)].into_iter().collect();
        assert_eq!(map.set_codes().collect::<Vec<_>>(), vec!["B", "A"]);
    }
}
