//! URL query-parameter synchronization over an opaque location backend.
//!
//! The host's URL and history APIs are external collaborators behind the
//! object-safe [`Location`] trait; [`MemoryLocation`] is the in-process
//! implementation. [`QueryParams`] reads typed values out of the query
//! string and writes typed values back into it.

mod cast;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

pub use cast::{cast_value, render_value};

/// URL capability supplied by the host.
pub trait Location: Send + Sync {
    /// Current path component.
    fn pathname(&self) -> String;
    /// Current query string, including the leading `?` when non-empty.
    fn search(&self) -> String;
    /// Replaces the current URL.
    fn replace(&self, url: &str);
}

/// In-process [`Location`] implementation; clones share state.
#[derive(Clone)]
pub struct MemoryLocation {
    state: Arc<Mutex<(String, String)>>,
}

impl MemoryLocation {
    /// Creates a location at `pathname` with an empty query string.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new((pathname.into(), String::new()))),
        }
    }
}

impl Location for MemoryLocation {
    fn pathname(&self) -> String {
        self.state.lock().0.clone()
    }

    fn search(&self) -> String {
        self.state.lock().1.clone()
    }

    fn replace(&self, url: &str) {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) if !query.is_empty() => {
                (path.to_string(), format!("?{query}"))
            }
            Some((path, _)) => (path.to_string(), String::new()),
            None => (url.to_string(), String::new()),
        };
        *self.state.lock() = (path, query);
    }
}

/// Typed query-parameter helper bound to a [`Location`].
///
/// ## Example
/// ```
/// use serde_json::json;
/// use hookset::{MemoryLocation, QueryParams};
///
/// let params = QueryParams::new(MemoryLocation::new("/search"));
/// params.set(&[("q", json!("rust")), ("page", json!(2))], None);
///
/// let read = params.get(&["q", "page"]);
/// assert_eq!(read["q"], json!("rust"));
/// assert_eq!(read["page"], json!(2));
/// ```
pub struct QueryParams<L: Location> {
    location: L,
}

impl<L: Location> QueryParams<L> {
    /// Binds the helper to a location backend.
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// Current path component.
    pub fn pathname(&self) -> String {
        self.location.pathname()
    }

    /// Current query string (with leading `?` when non-empty).
    pub fn search(&self) -> String {
        self.location.search()
    }

    /// Reads the requested keys from the current query string, casting each
    /// value via [`cast_value`]. Keys with empty or absent values are
    /// omitted.
    pub fn get(&self, keys: &[&str]) -> BTreeMap<String, Value> {
        let search = self.location.search();
        let raw = search.strip_prefix('?').unwrap_or(&search);

        let mut out = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            if !keys.contains(&key.as_ref()) || out.contains_key(key.as_ref()) {
                continue;
            }
            if let Some(value) = cast_value(&value) {
                out.insert(key.into_owned(), value);
            }
        }
        out
    }

    /// Encodes `params` as a query string (no leading `?`).
    pub fn build(&self, params: &[(&str, Value)]) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            serializer.append_pair(key, &render_value(value));
        }
        serializer.finish()
    }

    /// Replaces the query string of `url` (default: the current pathname)
    /// with the encoded `params`. A build that produces an empty string
    /// leaves the location untouched.
    pub fn set(&self, params: &[(&str, Value)], url: Option<&str>) {
        let query = self.build(params);
        if query.is_empty() {
            return;
        }
        let base = url.map(str::to_string).unwrap_or_else(|| self.location.pathname());
        let base = base.split('?').next().unwrap_or(&base).to_string();
        trace!(base = %base, query = %query, "query set");
        self.location.replace(&format!("{base}?{query}"));
    }

    /// Drops the query string, replacing the URL with the bare pathname.
    pub fn clear(&self) {
        self.location.replace(&self.location.pathname());
    }
}
