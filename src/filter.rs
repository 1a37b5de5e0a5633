//! Card visibility filter built from route parameters.

use crate::aggregate::TOTAL_ROW;
use crate::models::{Card, Rarity};
use crate::route::Route;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Ownership status criterion, matched against the card's live count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Any,
    /// At least one copy.
    Owned,
    /// Two or more copies.
    Duplicates,
    /// No copy.
    Missing,
}

impl Status {
    /// Parse a `status` parameter. Unknown values mean [`Status::Any`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "owned" => Status::Owned,
            "duplicates" => Status::Duplicates,
            "missing" => Status::Missing,
            _ => Status::Any,
        }
    }

    pub fn matches(self, count: u32) -> bool {
        match self {
            Status::Any => true,
            Status::Owned => count >= 1,
            Status::Duplicates => count >= 2,
            Status::Missing => count == 0,
        }
    }
}

// ---------------------------------------------------------------------------
// RarityFilter
// ---------------------------------------------------------------------------

/// Rarity criterion: an exact rarity or a bucket of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RarityFilter {
    Exact(Rarity),
    /// d1..d4
    Regular,
    /// s1..s3 and c1
    Secret,
    /// d1, d2
    OneTwoDiamond,
    /// d3, d4
    ThreeFourDiamond,
    /// s1..s3
    Star,
    /// c1
    Crown,
    /// Unrecognized selector; matches no card.
    Unknown,
}

impl RarityFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "regular" => RarityFilter::Regular,
            "secret" | "special" => RarityFilter::Secret,
            "one-two-diamond" => RarityFilter::OneTwoDiamond,
            "three-four-diamond" => RarityFilter::ThreeFourDiamond,
            "star" => RarityFilter::Star,
            "crown" => RarityFilter::Crown,
            other => match other.parse::<Rarity>() {
                Ok(rarity) => RarityFilter::Exact(rarity),
                Err(_) => {
                    log::warn!("Unknown rarity selector '{}'; no card will match", other);
                    RarityFilter::Unknown
                }
            },
        }
    }

    pub fn matches(self, rarity: Rarity) -> bool {
        match self {
            RarityFilter::Exact(r) => r == rarity,
            RarityFilter::Regular => rarity.is_regular(),
            RarityFilter::Secret => !rarity.is_regular(),
            RarityFilter::OneTwoDiamond => matches!(rarity, Rarity::D1 | Rarity::D2),
            RarityFilter::ThreeFourDiamond => matches!(rarity, Rarity::D3 | Rarity::D4),
            RarityFilter::Star => matches!(rarity, Rarity::S1 | Rarity::S2 | Rarity::S3),
            RarityFilter::Crown => rarity == Rarity::C1,
            RarityFilter::Unknown => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Conjunction of five independent criteria. Every criterion defaults to
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Lowercased name substring.
    query: Option<String>,
    status: Status,
    rarity: Option<RarityFilter>,
    set: Option<String>,
    booster: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from the query string of a page URL.
    pub fn from_query(query: &str) -> Self {
        Route::parse(query).filter()
    }

    /// Build a filter from named parameters. Unknown names are ignored and
    /// empty values leave their criterion unconstrained.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Filter::new();
        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                "q" => filter = filter.with_query(value),
                "status" => filter = filter.with_status(Status::parse(value)),
                "rarity" if !value.trim().is_empty() => {
                    filter = filter.with_rarity(RarityFilter::parse(value))
                }
                "set" => filter = filter.with_set(value),
                "booster" => filter = filter.with_booster(value),
                _ => {}
            }
        }
        filter
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = non_empty(query).map(|q| q.to_lowercase());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_rarity(mut self, rarity: RarityFilter) -> Self {
        self.rarity = Some(rarity);
        self
    }

    pub fn with_set(mut self, set_code: &str) -> Self {
        self.set = non_empty(set_code).map(str::to_string);
        self
    }

    pub fn with_booster(mut self, booster: &str) -> Self {
        self.booster = non_empty(booster).map(str::to_string);
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn rarity(&self) -> Option<RarityFilter> {
        self.rarity
    }

    pub fn set(&self) -> Option<&str> {
        self.set.as_deref()
    }

    pub fn booster(&self) -> Option<&str> {
        self.booster.as_deref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Filter::default()
    }

    /// Decide whether a card is visible given its current count.
    pub fn applies_to(&self, card: &Card, count: u32) -> bool {
        let text = self
            .query
            .as_ref()
            .map_or(true, |q| card.name.to_lowercase().contains(q.as_str()));
        let status = self.status.matches(count);
        let rarity = self.rarity.map_or(true, |r| r.matches(card.rarity));
        let set = self
            .set
            .as_ref()
            .map_or(true, |s| card.set_code.eq_ignore_ascii_case(s));
        let booster = self
            .booster
            .as_ref()
            .map_or(true, |b| b == TOTAL_ROW || card.in_booster(b));

        text && status && rarity && set && booster
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
