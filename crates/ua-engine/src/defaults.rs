//! The built-in rule table.
//!
//! Order within each chain is significant. Browser strings routinely carry
//! tokens of several products (Chrome advertises Safari, Android advertises
//! Linux), so more specific rules sit above the generic ones.

use crate::evaluator::ChainSpec;
use crate::rule::RuleSpec;
use crate::table::RuleTableSpec;
use crate::types::{browser, engine, platform, UNKNOWN, UNKNOWN_OS};
use crate::version::VERSION_TOKEN;
use std::collections::{BTreeMap, BTreeSet};

/// Shared by the OS and platform chains.
const WINDOWS_MOBILE: &str = r"windows (ce|phone|mobile)( os)?";

pub(crate) fn builtin() -> RuleTableSpec {
    RuleTableSpec {
        browsers: browsers(),
        engines: engines(),
        oses: oses(),
        platforms: platforms(),
        browser_versions: browser_versions(),
        mobile_platforms: [
            platform::ANDROID,
            platform::BLACKBERRY,
            platform::IPAD,
            platform::IPOD,
            platform::IPHONE,
            platform::WINDOWS_PHONE,
        ]
        .iter()
        .map(|p| p.to_string())
        .collect(),
        mobile_browsers: BTreeSet::from([browser::PSP.to_string()]),
        native_client_prefixes: BTreeSet::new(),
    }
}

fn browsers() -> ChainSpec {
    ChainSpec::new(UNKNOWN)
        .with_rule(RuleSpec::simple(browser::ELECTRON, "electron"))
        .with_rule(RuleSpec::simple(browser::CHROME, "chrome"))
        .with_rule(RuleSpec::simple(browser::SAFARI, "safari"))
        .with_rule(RuleSpec::simple(browser::OPERA, "opera"))
        .with_rule(RuleSpec::simple(browser::FIREFOX, "firefox"))
        .with_rule(RuleSpec::simple(browser::IE_MOBILE, "iemobile|windows phone"))
        .with_rule(RuleSpec::simple(browser::IE, "msie"))
        .with_rule(RuleSpec::simple(browser::PSP, "playstation portable"))
}

fn browser_versions() -> BTreeMap<String, String> {
    [
        (browser::ELECTRON, format!("electron/({VERSION_TOKEN})")),
        (browser::CHROME, format!("chrome/({VERSION_TOKEN})")),
        (browser::SAFARI, format!("version/({VERSION_TOKEN})")),
        (browser::PSP, format!(r"playstation portable\); ({VERSION_TOKEN})\)")),
    ]
    .into_iter()
    .map(|(category, pattern)| (category.to_string(), pattern))
    .collect()
}

fn engines() -> ChainSpec {
    ChainSpec::new(UNKNOWN)
        .with_rule(RuleSpec::simple(engine::WEBKIT, "webkit"))
        .with_rule(RuleSpec::simple(engine::CHROME, "chrome"))
        .with_rule(RuleSpec::simple(engine::GECKO, "gecko"))
        .with_rule(RuleSpec::simple(engine::MSIE, "msie"))
        .with_rule(RuleSpec::simple(engine::PRESTO, "presto"))
        .with_rule(RuleSpec::simple(engine::OPERA, "opera"))
}

fn oses() -> ChainSpec {
    ChainSpec::new(UNKNOWN_OS)
        .with_rule(RuleSpec::expanding(
            "ipad_os",
            r"\(iPad.*os ([0-9]+)[._]([0-9]+)",
            "iPad OS %s.%s",
        ))
        .with_rule(RuleSpec::expanding(
            "iphone_os",
            r"\(iPhone.*os ([0-9]+)[._]([0-9]+)",
            "iPhone OS %s.%s",
        ))
        .with_rule(RuleSpec::simple("Windows Phone", WINDOWS_MOBILE))
        .with_rule(RuleSpec::simple("Windows Vista", r"windows nt 6\.0"))
        // 6.1 and later.
        .with_rule(RuleSpec::simple("Windows 7", r"windows nt 6\.[0-9]+"))
        .with_rule(RuleSpec::simple("Windows 2003", r"windows nt 5\.2"))
        .with_rule(RuleSpec::simple("Windows XP", r"windows nt 5\.1"))
        .with_rule(RuleSpec::simple("Windows 2000", r"windows nt 5\.0"))
        .with_rule(RuleSpec::simple("Windows", "windows"))
        .with_rule(RuleSpec::expanding(
            "os_x",
            r"os x ([0-9]+)[._]([0-9]+)",
            "OS X %s.%s",
        ))
        .with_rule(RuleSpec::simple("Linux", "linux"))
}

fn platforms() -> ChainSpec {
    ChainSpec::new(UNKNOWN)
        .with_rule(RuleSpec::simple(platform::IPAD, "ipad"))
        .with_rule(RuleSpec::simple(platform::IPOD, "ipod"))
        .with_rule(RuleSpec::simple(platform::IPHONE, "iphone"))
        .with_rule(RuleSpec::simple(platform::WINDOWS_PHONE, WINDOWS_MOBILE))
        .with_rule(RuleSpec::simple(platform::WINDOWS, "windows"))
        .with_rule(RuleSpec::simple(platform::MAC, "macintosh"))
        .with_rule(RuleSpec::simple(platform::ANDROID, "android"))
        .with_rule(RuleSpec::simple(platform::LINUX, "linux"))
        .with_rule(RuleSpec::simple(platform::BLACKBERRY, "blackberry"))
}
