//! In-memory URL and history

use std::cell::RefCell;
use std::collections::BTreeMap;

use vitrina_ports::{HistoryEntry, Navigator};

#[derive(Debug, Default)]
struct Location {
    query: BTreeMap<String, String>,
    hash: String,
}

impl Location {
    /// Apply a URL the way the browser resolves it against the current one:
    /// `?..` replaces query and hash, `#..` replaces the hash, `/..` resets both.
    fn apply(&mut self, url: &str) {
        let (rest, hash) = match url.find('#') {
            Some(i) => (&url[..i], url[i..].to_string()),
            None => (url, String::new()),
        };
        if rest.is_empty() {
            self.hash = hash;
            return;
        }
        self.query.clear();
        self.hash = hash;
        if let Some(i) = rest.find('?') {
            for pair in rest[i + 1..].split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                self.query.insert(decode_component(key), decode_component(value));
            }
        }
    }
}

/// Decode a query component as `URLSearchParams` does: `+` is a space,
/// and malformed escapes are kept as written
fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    let decoded = urlencoding::decode(&raw).map(|decoded| decoded.into_owned());
    decoded.unwrap_or(raw)
}

/// Mock navigator for unit testing
///
/// `push_state`/`replace_state` update the simulated location so later
/// reads see the new URL, as in the browser.
#[derive(Debug, Default)]
pub struct MockNavigator {
    location: RefCell<Location>,
    pushed: RefCell<Vec<(HistoryEntry, String)>>,
    replaced: RefCell<Vec<(HistoryEntry, String)>>,
}

impl MockNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigator whose current location is `url` (e.g. `?proyecto=03`)
    pub fn at(url: &str) -> Self {
        let navigator = Self::new();
        navigator.navigate(url);
        navigator
    }

    /// Move the simulated location without touching history, as a
    /// back/forward traversal does
    pub fn navigate(&self, url: &str) {
        self.location.borrow_mut().apply(url);
    }

    /// Entries pushed so far, with their URLs
    pub fn pushed(&self) -> Vec<(HistoryEntry, String)> {
        self.pushed.borrow().clone()
    }

    /// Entries written with `replace_state`, with their URLs
    pub fn replaced(&self) -> Vec<(HistoryEntry, String)> {
        self.replaced.borrow().clone()
    }
}

impl Navigator for MockNavigator {
    fn query_param(&self, name: &str) -> Option<String> {
        self.location.borrow().query.get(name).cloned()
    }

    fn hash(&self) -> String {
        self.location.borrow().hash.clone()
    }

    fn push_state(&self, entry: &HistoryEntry, url: &str) {
        self.navigate(url);
        self.pushed.borrow_mut().push((entry.clone(), url.to_string()));
    }

    fn replace_state(&self, entry: &HistoryEntry, url: &str) {
        self.navigate(url);
        self.replaced.borrow_mut().push((entry.clone(), url.to_string()));
    }
}
