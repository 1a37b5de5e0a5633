//! The collection facade consumed by the presentation layer.
//!
//! A [`Collection`] joins the read-only [`Catalog`] with a [`Repository`]
//! of counts and the active [`Filter`], keeps per-set summaries current,
//! and notifies registered observers whenever a count changes.

use std::collections::HashMap;

use crate::aggregate::{self, SetSummary};
use crate::catalog::Catalog;
use crate::config::{self, SiteConfig};
use crate::filter::Filter;
use crate::models::{Card, Set};
use crate::repository::Repository;
use crate::route;
use crate::store::Store;

/// A count change, as reported to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountChange {
    pub set_code: String,
    pub number: u32,
    pub count: u32,
}

type Observer<'a> = Box<dyn FnMut(&CountChange) + 'a>;

pub struct Collection<'a, S: Store> {
    catalog: &'a Catalog,
    repo: Repository<S>,
    filter: Filter,
    show_empty_sets: bool,
    summaries: HashMap<String, SetSummary>,
    observers: Vec<Observer<'a>>,
}

impl<'a, S: Store> Collection<'a, S> {
    /// Join a catalog with a repository.
    ///
    /// Writable collections list every set; read-only ones hide sets with
    /// no owned card.
    pub fn new(catalog: &'a Catalog, repo: Repository<S>) -> Self {
        let mut collection = Self {
            catalog,
            repo,
            filter: Filter::default(),
            show_empty_sets: S::WRITABLE,
            summaries: HashMap::new(),
            observers: Vec::new(),
        };
        collection.refresh_all();
        collection
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_show_empty_sets(mut self, show: bool) -> Self {
        self.show_empty_sets = show;
        self
    }

    // -- Queries -----------------------------------------------------------

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn is_read_only(&self) -> bool {
        self.repo.is_read_only()
    }

    pub fn shows_empty_sets(&self) -> bool {
        self.show_empty_sets
    }

    /// Sets to display, newest release first.
    pub fn sets(&self) -> impl Iterator<Item = &'a Set> + '_ {
        let catalog: &'a Catalog = self.catalog;
        catalog
            .sets()
            .filter(move |s| self.show_empty_sets || self.repo.set_count(&s.code) > 0)
    }

    /// Cards of a set that pass the active filter, in catalog order.
    pub fn visible_cards(&self, set_code: &str) -> Vec<&'a Card> {
        let catalog: &'a Catalog = self.catalog;
        match catalog.set(set_code) {
            Some(set) => set.cards.iter().filter(|c| self.is_visible(c)).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_visible(&self, card: &Card) -> bool {
        self.filter
            .applies_to(card, self.repo.get(&card.set_code, card.number))
    }

    pub fn count(&self, set_code: &str, number: u32) -> u32 {
        self.repo.get(self.resolve(set_code).unwrap_or(set_code), number)
    }

    /// Number of distinct cards owned in a set.
    pub fn set_count(&self, set_code: &str) -> usize {
        self.repo.set_count(self.resolve(set_code).unwrap_or(set_code))
    }

    pub fn summary(&self, set_code: &str) -> Option<&SetSummary> {
        self.catalog
            .set(set_code)
            .and_then(|s| self.summaries.get(&s.code))
    }

    // -- Mutations ---------------------------------------------------------

    /// Add one copy of a card. Refused at the count cap, for sets outside
    /// the catalog, or when read-only.
    pub fn increment(&mut self, set_code: &str, number: u32) -> bool {
        let current = self.count(set_code, number);
        if self.is_read_only() || current >= config::MAX_CARD_COUNT {
            return false;
        }
        self.on_count_changed(set_code, number, i64::from(current) + 1)
    }

    /// Remove one copy of a card. Refused at zero or when read-only.
    pub fn decrement(&mut self, set_code: &str, number: u32) -> bool {
        let current = self.count(set_code, number);
        if self.is_read_only() || current == 0 {
            return false;
        }
        self.on_count_changed(set_code, number, i64::from(current) - 1)
    }

    /// Write a new count through the repository, refresh the set's summary
    /// and notify observers. Returns `true` if the count changed.
    ///
    /// The set code is matched against the catalog ignoring case and the
    /// count is stored under the catalog's spelling; unknown sets are
    /// refused.
    pub fn on_count_changed(&mut self, set_code: &str, number: u32, new_count: i64) -> bool {
        let Some(set_code) = self.resolve(set_code) else {
            log::debug!("Ignoring count for unknown set {}", set_code);
            return false;
        };
        if !self.repo.set(set_code, number, new_count) {
            return false;
        }
        self.refresh(set_code);

        let change = CountChange {
            set_code: set_code.to_string(),
            number,
            count: self.repo.get(set_code, number),
        };
        for observer in self.observers.iter_mut() {
            observer(&change);
        }
        true
    }

    /// Register a callback run after every count change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&CountChange) + 'a,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    // -- Sharing and backup ------------------------------------------------

    /// Route encoding of the current counts.
    pub fn serialize_route(&self) -> String {
        self.repo.serialize_route()
    }

    /// Link to the read-only view of this collection.
    pub fn share_link(&self, site: &SiteConfig) -> String {
        route::share_link(&site.root_url, &self.repo.serialize_route())
    }

    pub fn export(&self) -> String {
        self.repo.export()
    }

    /// Replace the counts from an exported snapshot. Returns `false` (and
    /// keeps the current counts) when the snapshot is unreadable.
    pub fn import(&mut self, record: &str) -> bool {
        if !self.repo.import(record) {
            return false;
        }
        self.refresh_all();
        true
    }

    // -- Helpers -----------------------------------------------------------

    /// Catalog spelling of a set code.
    fn resolve(&self, set_code: &str) -> Option<&'a str> {
        let catalog: &'a Catalog = self.catalog;
        catalog.set(set_code).map(|s| s.code.as_str())
    }

    fn refresh(&mut self, set_code: &str) {
        if let Some(set) = self.catalog.set(set_code) {
            self.summaries
                .insert(set.code.clone(), aggregate::summarize(set, self.repo.counts()));
        }
    }

    fn refresh_all(&mut self) {
        let counts = self.repo.counts();
        self.summaries = self
            .catalog
            .sets()
            .map(|s| (s.code.clone(), aggregate::summarize(s, counts)))
            .collect();
    }
}
