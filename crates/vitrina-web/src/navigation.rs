//! Browser URL and history

use vitrina_ports::{HistoryEntry, Navigator};
use wasm_bindgen::JsValue;
use web_sys::{UrlSearchParams, Window};

/// [`Navigator`] over `window.location` and `window.history`
#[derive(Clone)]
pub struct BrowserNavigator {
    window: Window,
}

impl BrowserNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Decode a popped `history.state` value
    ///
    /// Anything that is not a payload object (`null`, a foreign shape)
    /// decodes to `None`.
    pub fn decode_state(state: &JsValue) -> Option<HistoryEntry> {
        if state.is_null() || state.is_undefined() {
            return None;
        }
        let json = js_sys::JSON::stringify(state).ok()?.as_string()?;
        serde_json::from_str(&json).ok()
    }

    fn encode_state(entry: &HistoryEntry) -> JsValue {
        serde_json::to_string(entry)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .unwrap_or(JsValue::NULL)
    }
}

impl Navigator for BrowserNavigator {
    fn query_param(&self, name: &str) -> Option<String> {
        let search = self.window.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(name)
    }

    fn hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn push_state(&self, entry: &HistoryEntry, url: &str) {
        let result = self.window.history().and_then(|history| {
            history.push_state_with_url(&Self::encode_state(entry), "", Some(url))
        });
        if let Err(e) = result {
            log::warn!("[nav] pushState failed: {:?}", e);
        }
    }

    fn replace_state(&self, entry: &HistoryEntry, url: &str) {
        let result = self.window.history().and_then(|history| {
            history.replace_state_with_url(&Self::encode_state(entry), "", Some(url))
        });
        if let Err(e) = result {
            log::warn!("[nav] replaceState failed: {:?}", e);
        }
    }
}
