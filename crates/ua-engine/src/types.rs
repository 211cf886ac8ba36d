//! Core types and category identifiers.
//!
//! Categories are plain strings. Consumers compare them by equality, so the
//! constants below are the values the built-in rule table resolves to.

use serde::{Deserialize, Serialize};

/// Returned by the browser, engine, and platform axes when nothing matches.
pub const UNKNOWN: &str = "unknown";

/// Returned by the OS axis when nothing matches.
pub const UNKNOWN_OS: &str = "Unknown";

/// Browser categories.
pub mod browser {
    /// Electron shells. Reported as a desktop client, not by product name.
    pub const ELECTRON: &str = "desktop";
    pub const CHROME: &str = "chrome";
    pub const SAFARI: &str = "safari";
    pub const OPERA: &str = "opera";
    pub const FIREFOX: &str = "firefox";
    pub const IE_MOBILE: &str = "iemobile";
    pub const IE: &str = "ie";
    /// PlayStation Portable. Mobile regardless of platform.
    pub const PSP: &str = "psp";
}

/// Rendering engine categories.
pub mod engine {
    pub const WEBKIT: &str = "webkit";
    pub const CHROME: &str = "chrome";
    pub const GECKO: &str = "gecko";
    pub const MSIE: &str = "msie";
    pub const PRESTO: &str = "presto";
    pub const OPERA: &str = "opera";
}

/// Platform categories.
pub mod platform {
    pub const WINDOWS: &str = "windows";
    pub const MAC: &str = "macintosh";
    pub const LINUX: &str = "linux";
    pub const IPAD: &str = "ipad";
    pub const IPOD: &str = "ipod";
    pub const IPHONE: &str = "iphone";
    pub const ANDROID: &str = "android";
    pub const BLACKBERRY: &str = "blackberry";
    pub const WINDOWS_PHONE: &str = "windows_phone";
}

/// One of the four independent classification dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Browser,
    Engine,
    Os,
    Platform,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Browser => "browser",
            Axis::Engine => "engine",
            Axis::Os => "os",
            Axis::Platform => "platform",
        }
    }

    /// All axes, in the order chains appear in a rule document.
    pub const ALL: [Axis; 4] = [Axis::Browser, Axis::Engine, Axis::Os, Axis::Platform];
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
