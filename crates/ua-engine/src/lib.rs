//! UBL User-Agent Engine
//!
//! Classifies raw `User-Agent` header strings into browser, engine,
//! operating system, platform, and a mobile flag. Compiles to both WASM
//! (for Cloudflare Workers) and native.
//!
//! Classification is driven by an ordered rule table: each axis tries its
//! patterns in declared order and the first match wins.
//!
//! ```
//! use ua_engine::UserAgent;
//!
//! let ua = UserAgent::new(
//!     "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/36.0.1985.143 Safari/537.36",
//! );
//! assert_eq!(ua.browser_name(), "chrome");
//! assert_eq!(ua.browser_version(), "36.0.1985.143");
//! assert_eq!(ua.os(), "Windows 7");
//! assert!(!ua.mobile());
//! ```

mod defaults;
pub mod error;
pub mod evaluator;
pub mod hash;
pub mod parser;
pub mod rule;
pub mod table;
pub mod template;
pub mod types;
pub mod user_agent;
pub mod version;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, UaError};
pub use evaluator::{ChainSpec, RuleChain};
pub use rule::{Rule, RuleBuilder, RuleSpec};
pub use table::{init, install, RuleTable, RuleTableSpec};
pub use types::Axis;
pub use user_agent::{UserAgent, UserAgentInfo};

/// Version of the user-agent engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses `ua` against the process-wide rule table.
pub fn parse(ua: &str) -> UserAgent<'static> {
    UserAgent::new(ua)
}

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::error::{Result, UaError};
    pub use crate::table::{RuleTable, RuleTableSpec};
    pub use crate::types::*;
    pub use crate::user_agent::{UserAgent, UserAgentInfo};
}
