//! Collection tracker for a trading-card catalog.
//!
//! Records how many copies of each catalog card a user owns, persists those
//! counts, derives per-set and per-booster completion statistics, filters
//! the catalog, and shares a read-only snapshot of a collection through a
//! compact link.
//!
//! # Quick start
//!
//! ```no_run
//! use pocketdex::Tracker;
//!
//! let tracker = Tracker::builder()
//!     .catalog_path("cardDatabase.json")
//!     .root_url("https://example.org")
//!     .build()
//!     .unwrap();
//!
//! // The user's own, persisted collection
//! let mut mine = tracker.mine().unwrap();
//! mine.increment("A1", 1);
//! let link = mine.share_link(tracker.config());
//!
//! // Someone else's collection, decoded from a share link
//! let view = tracker.view(&link);
//! assert_eq!(view.count("A1", 1), 1);
//! ```

#[cfg(feature = "async")]
pub mod async_loader;
pub mod aggregate;
pub mod catalog;
pub mod codec;
pub mod collection;
pub mod config;
pub mod counts;
pub mod error;
pub mod filter;
pub mod models;
pub mod repository;
pub mod route;
pub mod store;

pub use aggregate::{BoosterSummary, SetSummary, Tally};
pub use catalog::{Catalog, CatalogSource};
pub use collection::{Collection, CountChange};
pub use config::SiteConfig;
pub use counts::CountMap;
pub use error::{Result, TrackerError};
pub use filter::{Filter, RarityFilter, Status};
pub use repository::{Repository, Snapshot};
pub use route::Route;
pub use store::{FileStore, MemoryStore, ReadOnly, Store};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// TrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Tracker`].
///
/// Use [`Tracker::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](TrackerBuilder::build) to load the catalog.
pub struct TrackerBuilder {
    data_dir: Option<PathBuf>,
    site: SiteConfig,
    catalog: Option<CatalogSource>,
    timeout: Duration,
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            site: SiteConfig::default(),
            catalog: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TrackerBuilder {
    /// Set the directory the durable collection is stored in.
    ///
    /// If not set, the platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/pocketdex` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the scheme and host share links point to.
    pub fn root_url(mut self, url: &str) -> Self {
        self.site.root_url = url.to_string();
        self
    }

    /// Wrap stored records in base64. Defaults to `false`.
    pub fn obfuscate_storage(mut self, obfuscate: bool) -> Self {
        self.site.obfuscate_storage = obfuscate;
        self
    }

    /// Load the catalog from a local file (`.gz` allowed).
    pub fn catalog_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalog = Some(CatalogSource::Path(path.as_ref().to_path_buf()));
        self
    }

    /// Download the catalog from a URL.
    ///
    /// Defaults to `cardDatabase.json` under the root URL when no other
    /// source is configured.
    pub fn catalog_url(mut self, url: &str) -> Self {
        self.catalog = Some(CatalogSource::Url(url.to_string()));
        self
    }

    /// Use an in-memory catalog document.
    pub fn catalog_json(mut self, json: &str) -> Self {
        self.catalog = Some(CatalogSource::Json(json.to_string()));
        self
    }

    /// Set the HTTP timeout for catalog downloads. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn catalog_source(&self) -> CatalogSource {
        self.catalog
            .clone()
            .unwrap_or_else(|| CatalogSource::Url(self.site.catalog_url()))
    }

    /// Load the catalog and build the tracker.
    ///
    /// A catalog that cannot be fetched or parsed is fatal; there is no
    /// partial catalog and no retry.
    pub fn build(self) -> Result<Tracker> {
        let catalog = Catalog::load(&self.catalog_source(), self.timeout)?;
        Ok(self.finish(catalog))
    }

    fn finish(self, catalog: Catalog) -> Tracker {
        Tracker {
            site: self.site,
            catalog,
            data_dir: self.data_dir.unwrap_or_else(config::default_data_dir),
        }
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Owns the site configuration and the loaded catalog, and hands out the
/// collections built on them.
///
/// Created via [`Tracker::builder()`].
pub struct Tracker {
    site: SiteConfig,
    catalog: Catalog,
    data_dir: PathBuf,
}

impl Tracker {
    /// Create a new builder for configuring the tracker.
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::default()
    }

    /// The user's own collection, persisted in the data directory.
    pub fn mine(&self) -> Result<Collection<'_, FileStore>> {
        let store = FileStore::new(Some(self.data_dir.clone()), config::STORAGE_KEY)?;
        let repo = Repository::open(store, self.site.obfuscate_storage)?;
        Ok(Collection::new(&self.catalog, repo))
    }

    /// A read-only collection decoded from a share link (or its query
    /// string). Named parameters of the link become the active filter.
    pub fn view(&self, url: &str) -> Collection<'_, ReadOnly> {
        let route = Route::parse(url);
        let repo = Repository::from_route(&route.share_payload());
        Collection::new(&self.catalog, repo).with_filter(route.filter())
    }

    pub fn config(&self) -> &SiteConfig {
        &self.site
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tracker(root_url={}, data_dir={}, sets={}, cards={})",
            self.site.root_url,
            self.data_dir.display(),
            self.catalog.len(),
            self.catalog.card_count()
        )
    }
}
