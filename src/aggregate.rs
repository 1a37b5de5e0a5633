//! Completion statistics per set and booster.
//!
//! [`summarize`] is a pure function of a set and the current counts; the
//! collection recomputes a set's summary after every change to it.

use crate::counts::CountMap;
use crate::models::{Card, CardType, Rarity, Set};
use serde::Serialize;

/// Name of the synthetic row covering every card of a set.
pub const TOTAL_ROW: &str = "Total";

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub owned: u32,
    pub total: u32,
}

impl Tally {
    pub fn new(owned: u32, total: u32) -> Self {
        Self { owned, total }
    }

    fn record(&mut self, owned: bool) {
        self.total += 1;
        if owned {
            self.owned += 1;
        }
    }

    pub fn missing(&self) -> u32 {
        self.total - self.owned
    }

    pub fn is_complete(&self) -> bool {
        self.owned == self.total
    }

    /// Completion ratio in `0.0..=1.0`; an empty tally counts as complete.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            f64::from(self.owned) / f64::from(self.total)
        }
    }
}

// ---------------------------------------------------------------------------
// BoosterSummary
// ---------------------------------------------------------------------------

/// Owned/total tallies for one booster (or the `Total` row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterSummary {
    pub booster: String,
    pub inferred_type: Option<CardType>,
    pub all: Tally,
    pub regular: Tally,
    pub secret: Tally,
    /// d1, d2, d3, d4 in order.
    pub tiers: [Tally; 4],
}

impl BoosterSummary {
    fn new(booster: &str, inferred_type: Option<CardType>) -> Self {
        Self {
            booster: booster.to_string(),
            inferred_type,
            all: Tally::default(),
            regular: Tally::default(),
            secret: Tally::default(),
            tiers: [Tally::default(); 4],
        }
    }

    fn record(&mut self, card: &Card, owned: bool) {
        self.all.record(owned);
        match card.rarity.tier() {
            Some(tier) => {
                self.regular.record(owned);
                self.tiers[tier].record(owned);
            }
            None => self.secret.record(owned),
        }
    }

    /// Tally of one regular tier; `None` for secret rarities.
    pub fn tier(&self, rarity: Rarity) -> Option<Tally> {
        rarity.tier().map(|i| self.tiers[i])
    }

    pub fn is_total(&self) -> bool {
        self.booster == TOTAL_ROW
    }
}

// ---------------------------------------------------------------------------
// SetSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSummary {
    pub set_code: String,
    /// One row per booster in catalog order, then `Total` when the set has
    /// more (or fewer) than one booster.
    pub rows: Vec<BoosterSummary>,
}

impl SetSummary {
    pub fn booster(&self, name: &str) -> Option<&BoosterSummary> {
        self.rows.iter().find(|r| r.booster == name)
    }

    /// Row covering the whole set: `Total`, or the only booster's row.
    pub fn overall(&self) -> &BoosterSummary {
        // rows is never empty: summarize always emits at least one row
        &self.rows[self.rows.len() - 1]
    }
}

/// Compute owned/total tallies for every booster of a set.
pub fn summarize(set: &Set, counts: &CountMap) -> SetSummary {
    let mut rows: Vec<BoosterSummary> = set
        .boosters
        .iter()
        .map(|b| BoosterSummary::new(&b.name, b.inferred_type))
        .collect();
    let mut total = BoosterSummary::new(TOTAL_ROW, None);

    for card in &set.cards {
        let owned = counts.get(&set.code, card.number) > 0;
        for row in rows.iter_mut() {
            if card.in_booster(&row.booster) {
                row.record(card, owned);
            }
        }
        total.record(card, owned);
    }

    if rows.len() != 1 {
        rows.push(total);
    }

    SetSummary {
        set_code: set.code.clone(),
        rows,
    }
}
