//! The user-agent facade.

use crate::table::RuleTable;
use crate::types::Axis;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

/// One parsed User-Agent string.
///
/// Each axis is evaluated at most once, on first access. The caches are
/// not thread-safe, which keeps `UserAgent` `!Sync`: share the rule table
/// across threads, not the instance.
#[derive(Debug, Clone)]
pub struct UserAgent<'t> {
    table: &'t RuleTable,
    s: String,
    browser: OnceCell<String>,
    engine: OnceCell<String>,
    os: OnceCell<String>,
    platform: OnceCell<String>,
}

impl UserAgent<'static> {
    /// Parses `ua` against the process-wide rule table.
    pub fn new(ua: &str) -> Self {
        Self::with_table(ua, RuleTable::global())
    }
}

impl<'t> UserAgent<'t> {
    /// Parses `ua` against a caller-supplied rule table.
    pub fn with_table(ua: &str, table: &'t RuleTable) -> Self {
        Self {
            table,
            s: ua.trim().to_string(),
            browser: OnceCell::new(),
            engine: OnceCell::new(),
            os: OnceCell::new(),
            platform: OnceCell::new(),
        }
    }

    /// The trimmed string being classified.
    pub fn as_str(&self) -> &str {
        &self.s
    }

    /// Whether the string comes from a first-party native client.
    pub fn is_native_client(&self) -> bool {
        self.table.is_native_client(&self.s)
    }

    fn resolve_web_axis(&self, axis: Axis) -> String {
        if self.is_native_client() {
            return self.table.chain(axis).fallback().to_string();
        }
        self.table.evaluate(axis, &self.s)
    }

    /// Browser category.
    pub fn browser_name(&self) -> &str {
        self.browser
            .get_or_init(|| self.resolve_web_axis(Axis::Browser))
    }

    /// Browser version, or an empty string if none was found.
    pub fn browser_version(&self) -> String {
        self.table.browser_version(self.browser_name(), &self.s)
    }

    /// Rendering engine category.
    pub fn engine(&self) -> &str {
        self.engine
            .get_or_init(|| self.resolve_web_axis(Axis::Engine))
    }

    /// Engine version, or an empty string if none was found.
    pub fn engine_version(&self) -> String {
        self.table.generic_version(self.engine(), &self.s)
    }

    /// Operating system description.
    pub fn os(&self) -> &str {
        self.os.get_or_init(|| self.table.evaluate(Axis::Os, &self.s))
    }

    /// Platform category.
    pub fn platform(&self) -> &str {
        self.platform
            .get_or_init(|| self.table.evaluate(Axis::Platform, &self.s))
    }

    /// Whether the client is a mobile device.
    pub fn mobile(&self) -> bool {
        self.table.is_mobile_platform(self.platform())
            || self.table.is_mobile_browser(self.browser_name())
    }

    /// Resolves every attribute into an owned snapshot.
    pub fn info(&self) -> UserAgentInfo {
        UserAgentInfo {
            browser_name: self.browser_name().to_string(),
            browser_version: self.browser_version(),
            engine: self.engine().to_string(),
            engine_version: self.engine_version(),
            os: self.os().to_string(),
            platform: self.platform().to_string(),
            mobile: self.mobile(),
        }
    }
}

/// All derived attributes of a user-agent string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentInfo {
    pub browser_name: String,
    pub browser_version: String,
    pub engine: String,
    pub engine_version: String,
    pub os: String,
    pub platform: String,
    pub mobile: bool,
}

impl From<&UserAgent<'_>> for UserAgentInfo {
    fn from(ua: &UserAgent<'_>) -> Self {
        ua.info()
    }
}
