//! WASM bindings for the user-agent engine.

#![cfg(feature = "wasm")]

use crate::user_agent::UserAgent;
use wasm_bindgen::prelude::*;

/// WASM-compatible user-agent wrapper.
///
/// Owns the trimmed string and resolves against the process-wide table.
#[wasm_bindgen]
pub struct WasmUserAgent {
    inner: UserAgent<'static>,
}

#[wasm_bindgen]
impl WasmUserAgent {
    /// Parses a user-agent string.
    #[wasm_bindgen(constructor)]
    pub fn new(ua: &str) -> Self {
        Self {
            inner: UserAgent::new(ua),
        }
    }

    #[wasm_bindgen(js_name = browserName)]
    pub fn browser_name(&self) -> String {
        self.inner.browser_name().to_string()
    }

    #[wasm_bindgen(js_name = browserVersion)]
    pub fn browser_version(&self) -> String {
        self.inner.browser_version()
    }

    #[wasm_bindgen]
    pub fn engine(&self) -> String {
        self.inner.engine().to_string()
    }

    #[wasm_bindgen(js_name = engineVersion)]
    pub fn engine_version(&self) -> String {
        self.inner.engine_version()
    }

    #[wasm_bindgen]
    pub fn os(&self) -> String {
        self.inner.os().to_string()
    }

    #[wasm_bindgen]
    pub fn platform(&self) -> String {
        self.inner.platform().to_string()
    }

    #[wasm_bindgen]
    pub fn mobile(&self) -> bool {
        self.inner.mobile()
    }

    /// Every attribute as a JSON string.
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.info()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Parses a user-agent string and returns every attribute as JSON.
#[wasm_bindgen]
pub fn parse_user_agent(ua: &str) -> Result<String, JsValue> {
    WasmUserAgent::new(ua).to_json()
}

/// Returns the fingerprint of the installed rule table.
#[wasm_bindgen]
pub fn rule_table_fingerprint() -> String {
    crate::table::RuleTable::global().fingerprint().to_string()
}

/// Logs a message to the console (for debugging).
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Returns the version of the user-agent engine.
#[wasm_bindgen]
pub fn version() -> String {
    crate::VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_user_agent() {
        let ua = WasmUserAgent::new(
            "Mozilla/5.0 (iPad; CPU OS 7_1_2 like Mac OS X) AppleWebKit/537.51.2 (KHTML, like Gecko) Version/7.0 Mobile/11D257 Safari/9537.53",
        );
        assert_eq!(ua.browser_name(), "safari");
        assert_eq!(ua.os(), "iPad OS 7.1");
        assert!(ua.mobile());
    }
}
