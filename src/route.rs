//! Page route parsing and share-link construction.
//!
//! A route's query string mixes named `key=value` parameters (the filter
//! criteria) with unnamed segments. On the view page the unnamed segments,
//! joined back with `&`, are the route-encoded collection being shared:
//!
//! ```rust
//! use pocketdex::route::Route;
//!
//! let route = Route::parse("https://example.org/view?A1-201&status=owned&B-1");
//! assert_eq!(route.share_payload(), "A1-201&B-1");
//! assert_eq!(route.param("status"), Some("owned"));
//! ```

use crate::config;
use crate::filter::Filter;
use indexmap::IndexMap;
use reqwest::Url;

/// Base used to reuse the URL parser's form decoding on bare query strings.
const DECODE_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    params: IndexMap<String, String>,
    payload: Vec<String>,
}

impl Route {
    /// Parse a full URL, a path with a query, or a bare query string.
    pub fn parse(input: &str) -> Self {
        let query = match input.split_once('?') {
            Some((_, query)) => query,
            None if input.contains("://") => "",
            None => input,
        };
        let query = query.split('#').next().unwrap_or("");

        let mut named: Vec<&str> = Vec::new();
        let mut payload: Vec<String> = Vec::new();
        for segment in query.split('&').filter(|s| !s.is_empty()) {
            if segment.contains('=') {
                named.push(segment);
            } else {
                payload.push(segment.to_string());
            }
        }

        Self {
            params: decode_pairs(&named.join("&")),
            payload,
        }
    }

    /// Decoded value of a named parameter (last occurrence wins).
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The route-encoded collection carried by unnamed segments.
    pub fn share_payload(&self) -> String {
        self.payload.join("&")
    }

    /// Filter criteria carried by the named parameters.
    pub fn filter(&self) -> Filter {
        Filter::from_params(self.params())
    }
}

/// Link to the read-only view page showing `payload`.
pub fn share_link(root_url: &str, payload: &str) -> String {
    format!(
        "{}/{}?{}",
        root_url.trim_end_matches('/'),
        config::VIEW_PATH,
        payload
    )
}

fn decode_pairs(query: &str) -> IndexMap<String, String> {
    if query.is_empty() {
        return IndexMap::new();
    }
    match Url::parse(DECODE_BASE) {
        Ok(mut url) => {
            url.set_query(Some(query));
            url.query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        }
        Err(e) => {
            log::error!("Failed to decode route parameters: {}", e);
            IndexMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_and_plus() {
        let route = Route::parse("?q=mew%20two+ex&set=A1");
        assert_eq!(route.param("q"), Some("mew two ex"));
        assert_eq!(route.param("set"), Some("A1"));
        assert_eq!(route.share_payload(), "");
    }

    #[test]
    fn url_without_query_is_empty() {
        assert_eq!(Route::parse("https://example.org/view"), Route::default());
    }
}
