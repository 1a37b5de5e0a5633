//! Async catalog loading for use in async runtimes (Tokio, etc.).
//!
//! The catalog download and parse are blocking; they run on the blocking
//! thread pool via [`tokio::task::spawn_blocking`] so the event loop stays
//! free while the catalog loads.
//!
//! # Example
//!
//! ```no_run
//! use pocketdex::Tracker;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let tracker = Tracker::builder()
//!         .root_url("https://example.org")
//!         .build_async()
//!         .await
//!         .unwrap();
//!     println!("{}", tracker);
//! }
//! ```

use std::time::Duration;

use crate::catalog::{Catalog, CatalogSource};
use crate::error::Result;
use crate::{Tracker, TrackerBuilder};

/// Load a catalog without blocking the async event loop.
pub async fn load_catalog(source: CatalogSource, timeout: Duration) -> Result<Catalog> {
    tokio::task::spawn_blocking(move || Catalog::load(&source, timeout)).await?
}

impl TrackerBuilder {
    /// Async counterpart of [`build()`](TrackerBuilder::build).
    pub async fn build_async(self) -> Result<Tracker> {
        let catalog = load_catalog(self.catalog_source(), self.timeout).await?;
        Ok(self.finish(catalog))
    }
}
