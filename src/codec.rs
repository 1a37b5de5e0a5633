//! Compact route encoding of a [`CountMap`] for shareable links.
//!
//! Each set becomes `<code>-<digits>`, where the i-th digit is the count of
//! card number i (1-based), and segments are joined with `&`:
//!
//! ```rust
//! use pocketdex::codec;
//! use pocketdex::CountMap;
//!
//! let counts: CountMap = [("A", 1, 2), ("A", 3, 1)].into_iter().collect();
//! assert_eq!(codec::serialize(&counts), "A-201");
//! assert_eq!(codec::deserialize("A-201"), counts);
//! ```
//!
//! Every card occupies exactly one character. Counts above 9 cannot be
//! written as a single digit and are clamped to `9` when encoding. Card
//! numbers outside `1..=MAX_ENCODED_NUMBER` have no position and are left
//! out. When a set code appears in more than one segment, the last segment
//! wins.

use indexmap::IndexMap;

use crate::counts::CountMap;

pub const SET_SEPARATOR: &str = "&";
pub const CODE_SEPARATOR: char = '-';

/// Highest count a single digit can carry.
pub const MAX_ENCODED_COUNT: u32 = 9;

/// Highest card number given a position in a segment.
pub const MAX_ENCODED_NUMBER: u32 = 9999;

/// Encode a mapping into its route string.
pub fn serialize(counts: &CountMap) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(counts.len());

    for set_code in counts.set_codes() {
        let mut cards: Vec<(u32, u32)> = counts
            .cards(set_code)
            .filter(|(number, _)| encodable(set_code, *number))
            .collect();
        cards.sort_unstable_by_key(|(number, _)| *number);
        let Some(&(max, _)) = cards.last() else {
            continue;
        };

        let mut segment = String::with_capacity(set_code.len() + 1 + max as usize);
        segment.push_str(set_code);
        segment.push(CODE_SEPARATOR);
        let mut next = 1;
        for (number, count) in cards {
            while next < number {
                segment.push('0');
                next += 1;
            }
            if count > MAX_ENCODED_COUNT {
                log::warn!(
                    "count {} for {}#{} exceeds {}; encoded as {}",
                    count,
                    set_code,
                    number,
                    MAX_ENCODED_COUNT,
                    MAX_ENCODED_COUNT
                );
            }
            segment.push(char::from_digit(count.min(MAX_ENCODED_COUNT), 10).unwrap_or('0'));
            next += 1;
        }
        segments.push(segment);
    }

    segments.join(SET_SEPARATOR)
}

fn encodable(set_code: &str, number: u32) -> bool {
    if (1..=MAX_ENCODED_NUMBER).contains(&number) {
        return true;
    }
    log::warn!("card number {} in set {} cannot be encoded", number, set_code);
    false
}

/// Decode a route string. Malformed input degrades to fewer entries and
/// never fails.
pub fn deserialize(encoded: &str) -> CountMap {
    let mut counts = CountMap::new();

    for segment in encoded.split(SET_SEPARATOR) {
        let Some((set_code, digits)) = segment.split_once(CODE_SEPARATOR) else {
            continue;
        };
        if digits.is_empty() {
            continue;
        }

        let cards: IndexMap<u32, u32> = digits
            .chars()
            .enumerate()
            .filter_map(|(i, ch)| {
                let count = ch.to_digit(10).unwrap_or(0);
                (count > 0).then_some((i as u32 + 1, count))
            })
            .collect();
        counts.replace_set(set_code, cards);
    }

    counts
}
