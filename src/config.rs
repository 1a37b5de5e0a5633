use std::path::PathBuf;

/// Storage key under which the durable collection record is kept.
pub const STORAGE_KEY: &str = "pocketPokedex";

/// Path (relative to the site root) of the read-only view page.
pub const VIEW_PATH: &str = "view";

/// Path (relative to the site root) of the card catalog document.
pub const CATALOG_PATH: &str = "cardDatabase.json";

/// Highest count the increment operation will record for a single card.
pub const MAX_CARD_COUNT: u32 = 9;

pub const DEFAULT_ROOT_URL: &str = "http://localhost:8080";

/// Site-wide settings, built once at startup and handed to whichever
/// component needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Scheme and host the site is served from, e.g. `https://example.org`.
    pub root_url: String,
    /// Wrap persisted records in URL-safe base64.
    pub obfuscate_storage: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            obfuscate_storage: false,
        }
    }
}

impl SiteConfig {
    /// URL of the catalog document served next to the site.
    pub fn catalog_url(&self) -> String {
        format!("{}/{}", self.root_url.trim_end_matches('/'), CATALOG_PATH)
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("pocketdex")
    } else {
        PathBuf::from(".pocketdex-data")
    }
}
